//! Input device abstraction

/// Rotary encoder with an integrated push button.
///
/// Both reads are snapshots: the encoder service (timer interrupt or task)
/// keeps running in the background and the main loop pulls whatever has
/// accumulated since the previous pass. Neither call may block.
pub trait RotaryInput {
    /// Signed rotation since the last read; `0` when the knob did not move.
    ///
    /// Positive values are clockwise steps.
    fn read_net_rotation(&mut self) -> i32;

    /// Debounced button state since the last read.
    fn read_button(&mut self) -> ButtonState;
}

/// Debounced state of the encoder push button.
///
/// Mirrors the states a click-encoder debouncer reports. The interaction core
/// acts on [`ButtonState::Clicked`] only; the other variants are passed
/// through so that input drivers do not have to filter them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonState {
    /// Button open, nothing to report
    #[default]
    Idle = 0,
    /// Contact closed, not yet classified
    Pressed = 1,
    /// Held past the hold threshold
    Held = 2,
    /// Released after a hold
    Released = 3,
    /// Short press and release
    Clicked = 4,
    /// Two clicks within the double-click window
    DoubleClicked = 5,
}

impl ButtonState {
    /// Decode the `repr(u8)` discriminant; unknown values read as `Idle`.
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Pressed,
            2 => Self::Held,
            3 => Self::Released,
            4 => Self::Clicked,
            5 => Self::DoubleClicked,
            _ => Self::Idle,
        }
    }

    /// Short human-readable name, for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pressed => "pressed",
            Self::Held => "held",
            Self::Released => "released",
            Self::Clicked => "clicked",
            Self::DoubleClicked => "double-clicked",
        }
    }
}

impl From<ButtonState> for u8 {
    fn from(state: ButtonState) -> Self {
        state as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminant_round_trip() {
        for state in [
            ButtonState::Idle,
            ButtonState::Pressed,
            ButtonState::Held,
            ButtonState::Released,
            ButtonState::Clicked,
            ButtonState::DoubleClicked,
        ] {
            assert_eq!(ButtonState::from_u8(u8::from(state)), state);
        }
    }

    #[test]
    fn test_unknown_discriminant_is_idle() {
        assert_eq!(ButtonState::from_u8(200), ButtonState::Idle);
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(ButtonState::default(), ButtonState::Idle);
    }
}
