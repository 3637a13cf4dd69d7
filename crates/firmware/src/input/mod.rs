//! Click-encoder input.
//!
//! | Part        | Runs on  | Role                                              |
//! |-------------|----------|---------------------------------------------------|
//! | [`builder`] | any      | Timing configuration                              |
//! | [`decoder`] | any      | Quadrature decoding and click classification      |
//! | [`service`] | any      | 1 kHz service pass publishing into shared cells   |
//! | `hardware`  | STM32H7  | Task owning the GPIO inputs                       |
//!
//! The main loop never sees pins: it reads a [`platform::SharedInput`] built
//! on the same [`platform::RotationCounter`] and [`platform::ButtonLatch`]
//! the service writes.

pub mod builder;
pub mod decoder;
pub mod service;

/// Hardware encoder task (GPIO polling at 1 kHz).
#[cfg(feature = "hardware")]
pub mod hardware;

pub use builder::{EncoderConfig, InputBuilder};
pub use decoder::{ClickDetector, ClickEvent, QuadratureDecoder};
pub use service::{KnobService, PinLevels};
