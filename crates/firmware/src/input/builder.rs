//! Fluent builder API for the encoder service configuration.
//!
//! The builder holds timing only; GPIO objects are passed straight to
//! [`spawn_encoder_task`](crate::input::hardware::spawn_encoder_task) so the
//! configuration stays free of `embassy_stm32` pin types and is testable on
//! the host.
//!
//! ```
//! use firmware::input::builder::InputBuilder;
//!
//! let config = InputBuilder::encoder()
//!     .steps_per_notch(4)
//!     .hold_ms(800)
//!     .double_click_ms(None)
//!     .build();
//! assert_eq!(config.hold_samples(), 80);
//! ```

use platform::config::ENCODER_SERVICE_INTERVAL_US;

/// Default button sample interval.
pub const DEFAULT_BUTTON_INTERVAL_MS: u32 = 10;
/// Default press length after which a press counts as held.
pub const DEFAULT_HOLD_MS: u32 = 1_000;
/// Default window in which a second click makes a double click.
pub const DEFAULT_DOUBLE_CLICK_MS: u32 = 400;

/// Resolved encoder service configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    steps_per_notch: u8,
    button_interval_ms: u32,
    hold_ms: u32,
    double_click_ms: Option<u32>,
}

impl EncoderConfig {
    /// Quadrature steps that make one reported detent.
    pub const fn steps_per_notch(&self) -> u8 {
        self.steps_per_notch
    }

    /// Milliseconds between button samples.
    pub const fn button_interval_ms(&self) -> u32 {
        self.button_interval_ms
    }

    /// Encoder service calls between two button samples.
    pub const fn services_per_button_sample(&self) -> u32 {
        let per_ms = match 1_000u64.checked_div(ENCODER_SERVICE_INTERVAL_US) {
            Some(0) | None => 1,
            Some(n) => n,
        };
        match (self.button_interval_ms as u64).checked_mul(per_ms) {
            Some(n) if n <= u32::MAX as u64 => n as u32,
            _ => u32::MAX,
        }
    }

    /// Button samples a press must last to count as held.
    pub const fn hold_samples(&self) -> u32 {
        div_or_one(self.hold_ms, self.button_interval_ms)
    }

    /// Button samples in the double-click window, `None` when disabled.
    pub const fn double_click_samples(&self) -> Option<u32> {
        match self.double_click_ms {
            Some(ms) => Some(div_or_one(ms, self.button_interval_ms)),
            None => None,
        }
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        InputBuilder::encoder().build()
    }
}

const fn div_or_one(value: u32, divisor: u32) -> u32 {
    match value.checked_div(divisor) {
        Some(0) | None => 1,
        Some(n) => n,
    }
}

/// Entry point for the fluent configuration chain.
pub struct InputBuilder;

impl InputBuilder {
    /// Start configuring the click encoder.
    pub const fn encoder() -> EncoderBuilder {
        EncoderBuilder {
            config: EncoderConfig {
                steps_per_notch: 1,
                button_interval_ms: DEFAULT_BUTTON_INTERVAL_MS,
                hold_ms: DEFAULT_HOLD_MS,
                double_click_ms: Some(DEFAULT_DOUBLE_CLICK_MS),
            },
        }
    }
}

/// Builder for [`EncoderConfig`].
#[derive(Debug, Clone, Copy)]
pub struct EncoderBuilder {
    config: EncoderConfig,
}

impl EncoderBuilder {
    /// Quadrature steps per detent (1, 2 or 4 on common encoders). Zero is
    /// treated as one.
    #[must_use]
    pub const fn steps_per_notch(mut self, steps: u8) -> Self {
        self.config.steps_per_notch = if steps == 0 { 1 } else { steps };
        self
    }

    /// Button sample interval; also the debounce time.
    #[must_use]
    pub const fn button_interval_ms(mut self, ms: u32) -> Self {
        self.config.button_interval_ms = if ms == 0 { 1 } else { ms };
        self
    }

    /// Press length after which the button reports `Held`.
    #[must_use]
    pub const fn hold_ms(mut self, ms: u32) -> Self {
        self.config.hold_ms = ms;
        self
    }

    /// Double-click window; `None` reports every click immediately.
    #[must_use]
    pub const fn double_click_ms(mut self, ms: Option<u32>) -> Self {
        self.config.double_click_ms = ms;
        self
    }

    /// Finish the chain.
    pub const fn build(self) -> EncoderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.steps_per_notch(), 1);
        assert_eq!(config.button_interval_ms(), 10);
        assert_eq!(config.services_per_button_sample(), 10);
        assert_eq!(config.hold_samples(), 100);
        assert_eq!(config.double_click_samples(), Some(40));
    }

    #[test]
    fn test_zero_values_are_clamped() {
        let config = InputBuilder::encoder()
            .steps_per_notch(0)
            .button_interval_ms(0)
            .hold_ms(0)
            .build();
        assert_eq!(config.steps_per_notch(), 1);
        assert_eq!(config.button_interval_ms(), 1);
        assert_eq!(config.hold_samples(), 1);
    }

    #[test]
    fn test_double_click_can_be_disabled() {
        let config = InputBuilder::encoder().double_click_ms(None).build();
        assert_eq!(config.double_click_samples(), None);
    }
}
