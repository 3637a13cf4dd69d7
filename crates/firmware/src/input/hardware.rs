//! Hardware encoder task: samples the click encoder at 1 kHz.
//!
//! # Pin assignments
//!
//! These constants document the target PCB assignment; change them to match
//! your board before flashing.
//!
//! | Signal          | MCU pin | Notes                          |
//! |-----------------|---------|--------------------------------|
//! | Encoder A       | PA8     | Active-low, internal pull-up   |
//! | Encoder B       | PA3     | Active-low, internal pull-up   |
//! | Push button     | PA0     | Active-low, internal pull-up   |
//!
//! # Architecture
//!
//! The task owns the three inputs and a [`KnobService`]. It publishes into the
//! static [`ROTATION`] and [`BUTTON`] cells; the main loop reads them through
//! [`knob_input`]. Polling at a fixed rate instead of on EXTI edges is what
//! debounces the contacts, and it keeps the quadrature state machine fed even
//! when an edge is missed.

use embassy_executor::{SpawnError, Spawner};
use embassy_stm32::gpio::{AnyPin, Input, Level, Pull};
use embassy_stm32::Peripheral;
use embassy_time::{Duration, Ticker};

use platform::config::ENCODER_SERVICE_INTERVAL_US;
use platform::{ButtonLatch, RotationCounter, SharedInput};

use super::builder::EncoderConfig;
use super::service::{KnobService, PinLevels};

/// Decoded detents not yet consumed by the main loop.
pub static ROTATION: RotationCounter = RotationCounter::new();

/// Last classified button state not yet consumed by the main loop.
pub static BUTTON: ButtonLatch = ButtonLatch::new();

/// Consumer side of the encoder cells.
pub fn knob_input() -> SharedInput<'static> {
    SharedInput::new(&ROTATION, &BUTTON)
}

/// Encoder inputs, configured with pull-ups.
pub struct EncoderPins {
    a: Input<'static, AnyPin>,
    b: Input<'static, AnyPin>,
    button: Input<'static, AnyPin>,
}

impl EncoderPins {
    /// Configure the encoder contacts and the push button.
    pub fn new(
        a: impl Peripheral<P = AnyPin> + 'static,
        b: impl Peripheral<P = AnyPin> + 'static,
        button: impl Peripheral<P = AnyPin> + 'static,
    ) -> Self {
        Self {
            a: Input::new(a, Pull::Up),
            b: Input::new(b, Pull::Up),
            button: Input::new(button, Pull::Up),
        }
    }

    fn levels(&self) -> PinLevels {
        PinLevels {
            a: self.a.get_level() == Level::Low,
            b: self.b.get_level() == Level::Low,
            button: self.button.get_level() == Level::Low,
        }
    }
}

/// Spawn the encoder task.
///
/// Call this once from the Embassy `main` function. The task owns the pins
/// for the lifetime of the program.
pub fn spawn_encoder_task(
    spawner: &Spawner,
    pins: EncoderPins,
    config: EncoderConfig,
) -> Result<(), SpawnError> {
    spawner.spawn(encoder_task(pins, config))
}

#[embassy_executor::task]
async fn encoder_task(pins: EncoderPins, config: EncoderConfig) {
    let mut service = KnobService::new(config, &ROTATION, &BUTTON);
    service.prime(pins.levels());
    defmt::info!("encoder service running: {}", config);

    let mut ticker = Ticker::every(Duration::from_micros(ENCODER_SERVICE_INTERVAL_US));
    loop {
        service.service(pins.levels());
        ticker.next().await;
    }
}
