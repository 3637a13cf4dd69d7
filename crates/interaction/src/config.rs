//! Interaction configuration
//!
//! Defaults come from the tuned product constants in [`platform::config`];
//! tests and the emulator override them through the builder methods.
//!
//! ```
//! use interaction::InteractionConfig;
//!
//! let config = InteractionConfig::new()
//!     .haptic_timeout_ms(20)
//!     .visual_timeout_ms(1_000)
//!     .validate()?;
//! assert_eq!(config.visual_timeout().as_millis(), 1_000);
//! # Ok::<(), interaction::ConfigError>(())
//! ```

use embassy_time::Duration;
use platform::config::{BRIGHTNESS_DIVISOR, HAPTIC_TIMEOUT_MS, VISUAL_TIMEOUT_MS};

use crate::feedback::Palette;
use crate::intensity::IntensityLevel;

/// Smallest divisor that keeps `|level| * 255 / divisor` within `u8`.
pub const MIN_BRIGHTNESS_DIVISOR: u8 = IntensityLevel::MAX.magnitude();

/// Longest accepted timeout: one hour, far inside the tick range of every
/// embassy-time tick rate.
pub const MAX_TIMEOUT_MS: u64 = 3_600_000;

/// Rejected configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The haptic window must close no later than the visual one.
    #[error("haptic timeout {haptic_ms} ms exceeds visual timeout {visual_ms} ms")]
    TimeoutOrder {
        /// Configured haptic timeout
        haptic_ms: u64,
        /// Configured visual timeout
        visual_ms: u64,
    },

    /// A timeout is too long to convert to timer ticks.
    #[error("timeout {timeout_ms} ms exceeds {max_ms} ms")]
    TimeoutTooLong {
        /// Offending timeout
        timeout_ms: u64,
        /// Largest accepted value
        max_ms: u64,
    },

    /// Full intensity would overflow the brightness byte.
    #[error("brightness divisor {0} is below {min}", min = MIN_BRIGHTNESS_DIVISOR)]
    BrightnessDivisor(u8),
}

/// Timing and feedback settings for the interaction core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionConfig {
    haptic_timeout_ms: u64,
    visual_timeout_ms: u64,
    brightness_divisor: u8,
    palette: Palette,
}

impl InteractionConfig {
    /// Tuned product defaults: 30 ms haptic, 600 ms visual, divisor 25.
    pub const fn new() -> Self {
        Self {
            haptic_timeout_ms: HAPTIC_TIMEOUT_MS,
            visual_timeout_ms: VISUAL_TIMEOUT_MS,
            brightness_divisor: BRIGHTNESS_DIVISOR,
            palette: Palette::new(),
        }
    }

    /// Set how long the motor runs after the last change.
    #[must_use]
    pub const fn haptic_timeout_ms(mut self, ms: u64) -> Self {
        self.haptic_timeout_ms = ms;
        self
    }

    /// Set how long the light stays on after the last change.
    #[must_use]
    pub const fn visual_timeout_ms(mut self, ms: u64) -> Self {
        self.visual_timeout_ms = ms;
        self
    }

    /// Set the divisor in `|level| * 255 / divisor`.
    #[must_use]
    pub const fn brightness_divisor(mut self, divisor: u8) -> Self {
        self.brightness_divisor = divisor;
        self
    }

    /// Replace the feedback colours.
    #[must_use]
    pub const fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Check the settings and hand them back unchanged if they hold together.
    pub const fn validate(self) -> Result<Self, ConfigError> {
        if self.visual_timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::TimeoutTooLong {
                timeout_ms: self.visual_timeout_ms,
                max_ms: MAX_TIMEOUT_MS,
            });
        }
        if self.haptic_timeout_ms > self.visual_timeout_ms {
            return Err(ConfigError::TimeoutOrder {
                haptic_ms: self.haptic_timeout_ms,
                visual_ms: self.visual_timeout_ms,
            });
        }
        if self.brightness_divisor < MIN_BRIGHTNESS_DIVISOR {
            return Err(ConfigError::BrightnessDivisor(self.brightness_divisor));
        }
        Ok(self)
    }

    /// Haptic window, capped at [`MAX_TIMEOUT_MS`]
    pub const fn haptic_timeout(&self) -> Duration {
        Duration::from_millis(capped(self.haptic_timeout_ms))
    }

    /// Visual window, capped at [`MAX_TIMEOUT_MS`]
    pub const fn visual_timeout(&self) -> Duration {
        Duration::from_millis(capped(self.visual_timeout_ms))
    }

    /// Brightness divisor
    pub const fn divisor(&self) -> u8 {
        self.brightness_divisor
    }

    /// Feedback colours
    pub const fn colors(&self) -> &Palette {
        &self.palette
    }
}

/// `Duration::from_millis` overflows on large inputs.
const fn capped(ms: u64) -> u64 {
    if ms > MAX_TIMEOUT_MS {
        MAX_TIMEOUT_MS
    } else {
        ms
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self::new()
    }
}
