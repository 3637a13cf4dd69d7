//! Application configuration and constants
//!
//! Central product values used across the workspace. Tuned timing values live
//! here as defaults; the interaction core takes them through its own
//! configuration type so that tests and the emulator can override them.

/// The application name
pub const APP_NAME: &str = "Volume Knob";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of pixels on the ring around the knob
pub const PIXEL_COUNT: usize = 12;

/// Haptic pulse length: the motor is switched off once this much time has
/// passed without input.
pub const HAPTIC_TIMEOUT_MS: u64 = 30;

/// Light and intensity decay: the ring goes dark and the intensity level
/// resets once this much time has passed without input.
pub const VISUAL_TIMEOUT_MS: u64 = 600;

/// Divisor applied to `|intensity| * 255` to derive strip brightness.
///
/// 10 would map full intensity to full brightness; 25 keeps the ring dim.
pub const BRIGHTNESS_DIVISOR: u8 = 25;

/// Encoder service cadence (the debouncer runs at 1 kHz)
pub const ENCODER_SERVICE_INTERVAL_US: u64 = 1_000;

