//! Encoder service: one call per millisecond, from the encoder task.
//!
//! [`KnobService`] owns the decoder state and publishes into the two shared
//! cells the main loop drains. It is the producer half of
//! [`platform::SharedInput`].

use platform::{ButtonLatch, ButtonState, RotationCounter};

use super::builder::EncoderConfig;
use super::decoder::{ClickDetector, QuadratureDecoder};

/// Contact levels sampled in one service call, `true` = active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PinLevels {
    /// Encoder contact A
    pub a: bool,
    /// Encoder contact B
    pub b: bool,
    /// Push button
    pub button: bool,
}

impl PinLevels {
    /// Levels with the button open.
    pub const fn encoder(a: bool, b: bool) -> Self {
        Self {
            a,
            b,
            button: false,
        }
    }
}

/// Producer side of the encoder cells.
pub struct KnobService<'a> {
    decoder: QuadratureDecoder,
    detector: ClickDetector,
    services_per_sample: u32,
    until_sample: u32,
    rotation: &'a RotationCounter,
    button: &'a ButtonLatch,
}

impl<'a> KnobService<'a> {
    /// Bind the service to the cells the main loop reads.
    pub fn new(config: EncoderConfig, rotation: &'a RotationCounter, button: &'a ButtonLatch) -> Self {
        Self {
            decoder: QuadratureDecoder::new(config.steps_per_notch()),
            detector: ClickDetector::new(config.hold_samples(), config.double_click_samples()),
            services_per_sample: config.services_per_button_sample(),
            until_sample: 0,
            rotation,
            button,
        }
    }

    /// Take the contacts' resting levels so power-up does not count a step.
    pub fn prime(&mut self, levels: PinLevels) {
        self.decoder.prime(levels.a, levels.b);
    }

    /// Run one service pass.
    ///
    /// The encoder contacts are decoded on every call; the button is sampled
    /// once every button interval.
    pub fn service(&mut self, levels: PinLevels) {
        self.decoder.sample(levels.a, levels.b);
        self.rotation.add(self.decoder.take_notches());

        if self.until_sample > 0 {
            self.until_sample = self.until_sample.saturating_sub(1);
            return;
        }
        self.until_sample = self.services_per_sample.saturating_sub(1);

        if let Some(event) = self.detector.sample(levels.button) {
            let state = ButtonState::from(event);
            if state != ButtonState::Held {
                debug!("button {}", state.as_str());
            }
            self.button.latch(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::builder::InputBuilder;

    fn service_n(service: &mut KnobService<'_>, levels: PinLevels, n: u32) {
        for _ in 0..n {
            service.service(levels);
        }
    }

    #[test]
    fn test_rotation_reaches_counter() {
        let rotation = RotationCounter::new();
        let button = ButtonLatch::new();
        let mut service = KnobService::new(EncoderConfig::default(), &rotation, &button);

        for (a, b) in [(false, true), (true, true), (true, false), (false, false)] {
            service.service(PinLevels::encoder(a, b));
        }
        assert_eq!(rotation.take(), 4);
    }

    #[test]
    fn test_primed_resting_level_is_not_a_step() {
        let rotation = RotationCounter::new();
        let button = ButtonLatch::new();
        let mut service = KnobService::new(EncoderConfig::default(), &rotation, &button);

        service.prime(PinLevels::encoder(true, false));
        service_n(&mut service, PinLevels::encoder(true, false), 5);
        assert_eq!(rotation.take(), 0);
    }

    #[test]
    fn test_click_latches_after_double_click_window() {
        let rotation = RotationCounter::new();
        let button = ButtonLatch::new();
        let mut service = KnobService::new(EncoderConfig::default(), &rotation, &button);

        let down = PinLevels {
            button: true,
            ..PinLevels::default()
        };
        service_n(&mut service, down, 50);
        service_n(&mut service, PinLevels::default(), 100);
        assert_eq!(button.take(), ButtonState::Idle);

        service_n(&mut service, PinLevels::default(), 400);
        assert_eq!(button.take(), ButtonState::Clicked);
    }

    #[test]
    fn test_click_is_immediate_without_double_click() {
        let rotation = RotationCounter::new();
        let button = ButtonLatch::new();
        let config = InputBuilder::encoder().double_click_ms(None).build();
        let mut service = KnobService::new(config, &rotation, &button);

        let down = PinLevels {
            button: true,
            ..PinLevels::default()
        };
        service_n(&mut service, down, 30);
        service_n(&mut service, PinLevels::default(), 10);
        assert_eq!(button.take(), ButtonState::Clicked);
    }
}
