//! Concrete collaborator drivers.
//!
//! | Driver                | Trait                        | Bus                   |
//! |-----------------------|------------------------------|-----------------------|
//! | [`GpioHaptic`]        | [`platform::HapticActuator`] | one GPIO output       |
//! | [`Ws2812`]            | [`platform::LightStrip`]     | SPI MOSI (3.125 MHz)  |
//! | [`QueuedCommandSink`] | [`platform::HostCommandSink`]| embassy channel → USB |
//!
//! All three are written against `embedded-hal` 1.0 / `embassy-sync` traits
//! only, so they build and test on the host.

pub mod command;
pub mod haptic;
pub mod ws2812;

pub use command::QueuedCommandSink;
pub use haptic::GpioHaptic;
pub use ws2812::Ws2812;
