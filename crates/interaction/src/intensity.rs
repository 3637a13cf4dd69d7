//! Intensity register: the clamped, signed level behind feedback brightness
//! and command direction.
//!
//! The level lives in `-10..=10`. Once the knob has been turned the level is
//! never zero: the first step in either direction snaps it to `±1`, and it
//! never crosses zero without passing through that snap. Only a decay reset
//! brings it back to zero.

/// Signed intensity in `-10..=10`.
///
/// Positive values follow increases, negative values follow decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct IntensityLevel(i8);

impl IntensityLevel {
    /// Resting level: nothing happened recently.
    pub const ZERO: Self = Self(0);
    /// Upper saturation point.
    pub const MAX: Self = Self(10);
    /// Lower saturation point.
    pub const MIN: Self = Self(-10);
    /// Level after a mute click, one step short of `MAX`.
    pub const MUTED: Self = Self(9);

    /// Build a level, clamping into `-10..=10`.
    #[must_use]
    pub fn new(value: i8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Raw signed value.
    #[must_use]
    pub const fn get(self) -> i8 {
        self.0
    }

    /// Absolute value, `0..=10`.
    #[must_use]
    pub const fn magnitude(self) -> u8 {
        self.0.unsigned_abs()
    }

    /// `true` for the resting level.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// Owner of the current [`IntensityLevel`].
///
/// Every operation returns the level it leaves behind.
#[derive(Debug, Clone, Default)]
pub struct IntensityRegister {
    level: IntensityLevel,
}

impl IntensityRegister {
    /// Register at [`IntensityLevel::ZERO`].
    pub const fn new() -> Self {
        Self {
            level: IntensityLevel::ZERO,
        }
    }

    /// Current level.
    pub const fn level(&self) -> IntensityLevel {
        self.level
    }

    /// Step up: `clamp(max(1, level + 1), 1, 10)`.
    ///
    /// A negative level snaps straight to `1`.
    pub fn increase(&mut self) -> IntensityLevel {
        let next = self.level.0.saturating_add(1).max(1);
        self.level = IntensityLevel(next.min(IntensityLevel::MAX.0));
        self.level
    }

    /// Step down: `clamp(min(-1, level - 1), -10, -1)`.
    ///
    /// A positive level snaps straight to `-1`.
    pub fn decrease(&mut self) -> IntensityLevel {
        let next = self.level.0.saturating_sub(1).min(-1);
        self.level = IntensityLevel(next.max(IntensityLevel::MIN.0));
        self.level
    }

    /// Force [`IntensityLevel::MUTED`] regardless of the current level.
    pub fn mute(&mut self) -> IntensityLevel {
        self.level = IntensityLevel::MUTED;
        self.level
    }

    /// Back to [`IntensityLevel::ZERO`].
    pub fn reset(&mut self) -> IntensityLevel {
        self.level = IntensityLevel::ZERO;
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_increase_is_one() {
        let mut reg = IntensityRegister::new();
        assert_eq!(reg.increase().get(), 1);
    }

    #[test]
    fn test_first_decrease_is_minus_one() {
        let mut reg = IntensityRegister::new();
        assert_eq!(reg.decrease().get(), -1);
        assert_eq!(reg.decrease().get(), -2);
    }

    #[test]
    fn test_direction_change_snaps_to_unit() {
        let mut reg = IntensityRegister::new();
        for _ in 0..5 {
            reg.increase();
        }
        assert_eq!(reg.decrease().get(), -1);
        reg.decrease();
        reg.decrease();
        assert_eq!(reg.increase().get(), 1);
    }

    #[test]
    fn test_saturates_at_ten() {
        let mut reg = IntensityRegister::new();
        for _ in 0..25 {
            reg.increase();
        }
        assert_eq!(reg.level(), IntensityLevel::MAX);
        for _ in 0..25 {
            reg.decrease();
        }
        assert_eq!(reg.level(), IntensityLevel::MIN);
    }

    #[test]
    fn test_mute_from_any_level() {
        let mut reg = IntensityRegister::new();
        assert_eq!(reg.mute(), IntensityLevel::MUTED);
        reg.decrease();
        reg.decrease();
        assert_eq!(reg.level().get(), -1);
        assert_eq!(reg.mute().get(), 9);
    }

    #[test]
    fn test_muted_ramps_to_max_on_increase() {
        let mut reg = IntensityRegister::new();
        reg.mute();
        assert_eq!(reg.increase(), IntensityLevel::MAX);
    }

    #[test]
    fn test_reset_returns_to_zero() {
        let mut reg = IntensityRegister::new();
        reg.increase();
        assert!(reg.reset().is_zero());
    }

    #[test]
    fn test_level_new_clamps() {
        assert_eq!(IntensityLevel::new(42), IntensityLevel::MAX);
        assert_eq!(IntensityLevel::new(-42), IntensityLevel::MIN);
        assert_eq!(IntensityLevel::new(-3).magnitude(), 3);
    }
}
