//! Mapping from interaction events to light output.

use platform::{HostCommand, Rgb};

use crate::intensity::IntensityLevel;

/// Which feedback an event shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackKind {
    /// Knob turned clockwise
    Increase,
    /// Knob turned counter-clockwise
    Decrease,
    /// Button clicked
    Mute,
}

impl FeedbackKind {
    /// Host command sent alongside this feedback.
    pub const fn command(self) -> HostCommand {
        match self {
            Self::Increase => HostCommand::VolumeUp,
            Self::Decrease => HostCommand::VolumeDown,
            Self::Mute => HostCommand::Mute,
        }
    }

    /// Short name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Mute => "mute",
        }
    }
}

/// Strip colours for each kind of feedback, plus the idle colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Shown while turning up
    pub increase: Rgb,
    /// Shown while turning down
    pub decrease: Rgb,
    /// Shown after a mute click
    pub mute: Rgb,
    /// Idle colour
    pub off: Rgb,
}

impl Palette {
    /// Green up, red down, blue mute, black idle.
    pub const fn new() -> Self {
        Self {
            increase: Rgb::GREEN,
            decrease: Rgb::RED,
            mute: Rgb::BLUE,
            off: Rgb::BLACK,
        }
    }

    /// Colour for `kind`.
    pub const fn color(&self, kind: FeedbackKind) -> Rgb {
        match kind {
            FeedbackKind::Increase => self.increase,
            FeedbackKind::Decrease => self.decrease,
            FeedbackKind::Mute => self.mute,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip brightness for `level`: `|level| * 255 / divisor`.
///
/// Saturates at 255 for divisors below 10 and yields 0 for a zero divisor.
pub fn brightness(level: IntensityLevel, divisor: u8) -> u8 {
    let scaled = u16::from(level.magnitude()).saturating_mul(255);
    let value = scaled.checked_div(u16::from(divisor)).unwrap_or(0);
    u8::try_from(value).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_default_divisor() {
        assert_eq!(brightness(IntensityLevel::ZERO, 25), 0);
        assert_eq!(brightness(IntensityLevel::new(1), 25), 10);
        assert_eq!(brightness(IntensityLevel::new(-2), 25), 20);
        assert_eq!(brightness(IntensityLevel::MUTED, 25), 91);
        assert_eq!(brightness(IntensityLevel::MAX, 25), 102);
    }

    #[test]
    fn test_brightness_full_scale() {
        assert_eq!(brightness(IntensityLevel::MAX, 10), 255);
        assert_eq!(brightness(IntensityLevel::MIN, 10), 255);
    }

    #[test]
    fn test_brightness_degenerate_divisors() {
        assert_eq!(brightness(IntensityLevel::MAX, 1), 255);
        assert_eq!(brightness(IntensityLevel::MAX, 0), 0);
    }

    #[test]
    fn test_kind_maps_to_command_and_colour() {
        let palette = Palette::default();
        assert_eq!(FeedbackKind::Decrease.command(), HostCommand::VolumeDown);
        assert_eq!(FeedbackKind::Increase.command(), HostCommand::VolumeUp);
        assert_eq!(FeedbackKind::Mute.command(), HostCommand::Mute);
        assert_eq!(palette.color(FeedbackKind::Decrease), Rgb::RED);
        assert_eq!(palette.color(FeedbackKind::Mute), Rgb::BLUE);
    }
}
