//! Interaction core for the volume knob
//!
//! Converts net encoder rotation and button clicks into a clamped intensity
//! level, host media commands and time-gated light/haptic feedback.
//!
//! # Layout
//!
//! ```text
//! Controller::tick()              (controller)
//!     ↓
//! InteractionStateMachine::step   (machine)
//!     ├── IntensityRegister       (intensity)
//!     ├── DeltaAccumulator        (accumulator, timestamped)
//!     └── DecayPolicy             (decay)
//! ```
//!
//! Everything below [`Controller`] is pure and I/O-free. The controller owns
//! the [`platform`] collaborators and is the only part that writes to them.
//!
//! # Features
//!
//! - `std`: Pull in `platform/std` (mocks, `std::error::Error` impls)
//! - `defmt`: Log through `defmt` (hardware builds)
//! - `tracing`: Log through `tracing` (emulator and desktop builds)

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unreachable)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod fmt;

pub mod accumulator;
pub mod config;
pub mod controller;
pub mod decay;
pub mod feedback;
pub mod intensity;
pub mod machine;
pub mod timestamped;

pub use accumulator::DeltaAccumulator;
pub use config::{ConfigError, InteractionConfig, MAX_TIMEOUT_MS, MIN_BRIGHTNESS_DIVISOR};
pub use controller::{Controller, ControllerError, TickError, TickReport};
pub use decay::DecayPolicy;
pub use feedback::{brightness, FeedbackKind, Palette};
pub use intensity::{IntensityLevel, IntensityRegister};
pub use machine::{InteractionEvent, InteractionStateMachine, Phase, Step, TickInput};
pub use timestamped::TimestampedValue;
