//! Volume Knob Firmware
//!
//! USB volume knob for STM32H7: a click encoder, a 12-pixel WS2812 ring and a
//! vibration motor around the [`interaction`] core.
//!
//! # Architecture
//!
//! This firmware follows a layered architecture:
//!
//! ```text
//! Application Layer (main.rs, emulator)
//!         ↓
//! Interaction core (interaction crate: Controller::tick)
//!         ↓
//! Drivers (drivers, input, usb)
//!         ↓
//! Platform HAL (platform traits, Embassy, STM32)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for STM32H7 target (embassy, embedded HAL, USB HID)
//! - `emulator` - Build for desktop testing (tokio, tracing)
//! - `std` - Enable standard library (for emulator and testing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```
//!
//! ## Emulator Target
//!
//! ```bash
//! cargo run --example knob_emulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
// unsafe fn body is not implicitly unsafe block
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)] // dbg! should not be left in committed code
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)] // common in Rust crates; not a real issue
#![allow(clippy::missing_errors_doc)] // most errors are self-explanatory
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

#[macro_use]
mod fmt;

pub mod boot;
pub mod drivers;
pub mod exception_handlers;
pub mod input;

/// USB HID consumer-control device.
#[cfg(feature = "hardware")]
pub mod usb;

/// Desktop emulator.
#[cfg(feature = "emulator")]
pub mod emulator;

// Re-export key types
pub use drivers::{GpioHaptic, QueuedCommandSink, Ws2812};
pub use input::{EncoderConfig, InputBuilder, KnobService};
