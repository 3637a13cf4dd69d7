//! Light strip abstraction

/// 24-bit colour, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// All channels off
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Full red
    pub const RED: Self = Self::new(255, 0, 0);
    /// Full green
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Full blue
    pub const BLUE: Self = Self::new(0, 0, 255);

    /// Build a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `brightness / 255`.
    ///
    /// `255` leaves the colour untouched and `0` yields [`Rgb::BLACK`].
    #[must_use]
    pub fn scaled(self, brightness: u8) -> Self {
        Self {
            r: scale_channel(self.r, brightness),
            g: scale_channel(self.g, brightness),
            b: scale_channel(self.b, brightness),
        }
    }

    /// `true` when no channel emits light.
    pub const fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

fn scale_channel(channel: u8, brightness: u8) -> u8 {
    // 255 * 255 fits in u16; the quotient fits in u8.
    let product = u16::from(channel).saturating_mul(u16::from(brightness));
    u8::try_from(product / 255).unwrap_or(u8::MAX)
}

/// Addressable light strip driven as a single strip-wide colour.
pub trait LightStrip {
    /// Error type for strip writes
    type Error: core::fmt::Debug;

    /// Set every pixel to `color` at `brightness` (0 = off, 255 = full) and
    /// latch the frame.
    fn set_light(&mut self, color: Rgb, brightness: u8) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_brightness_is_identity() {
        assert_eq!(Rgb::new(12, 200, 255).scaled(255), Rgb::new(12, 200, 255));
    }

    #[test]
    fn test_zero_brightness_is_black() {
        assert!(Rgb::GREEN.scaled(0).is_black());
    }

    #[test]
    fn test_half_brightness() {
        // 255 * 102 / 255 = 102
        assert_eq!(Rgb::RED.scaled(102), Rgb::new(102, 0, 0));
    }
}
