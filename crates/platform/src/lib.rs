//! Hardware Abstraction Layer (HAL) for the volume knob
//!
//! This crate provides trait-based abstractions for every peripheral the
//! interaction core talks to, enabling development and testing without
//! physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Interaction core (interaction crate)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Collaborators
//!
//! - [`RotaryInput`] - Net encoder rotation and debounced button state
//! - [`Clock`] - Monotonic timestamps
//! - [`LightStrip`] - Strip-wide colour and brightness
//! - [`HapticActuator`] - Vibration motor on/off
//! - [`HostCommandSink`] - Media-control commands towards the host
//!
//! The only state shared with interrupt context lives in [`shared`]:
//! [`RotationCounter`] and [`ButtonLatch`] are lock-free cells written by the
//! encoder service task and drained by the main loop.
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable defmt logging derives
//!
//! # Example
//!
//! ```no_run
//! use platform::{HostCommand, HostCommandSink};
//!
//! fn mute<S: HostCommandSink>(sink: &mut S) -> Result<(), S::Error> {
//!     sink.emit_command(HostCommand::Mute)
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod clock;
pub mod command;
pub mod config;
pub mod haptic;
pub mod input;
pub mod light;
pub mod shared;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use clock::{Clock, EmbassyClock};
pub use command::{CommandQueueFull, ConsumerReport, HostCommand, HostCommandSink};
pub use haptic::HapticActuator;
pub use input::{ButtonState, RotaryInput};
pub use light::{LightStrip, Rgb};
pub use shared::{ButtonLatch, RotationCounter, SharedInput};

// Timestamps and durations are embassy-time types across the workspace.
pub use embassy_time::{Duration, Instant};
