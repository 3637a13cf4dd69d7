//! Vibration motor on a single GPIO.
//!
//! The motor is driven through a transistor, so the pin level is the motor
//! state: high runs it, low stops it.

use embedded_hal::digital::OutputPin;
use platform::HapticActuator;

/// Vibration motor driver.
///
/// Holds ownership of the motor GPIO pin and tracks the commanded state.
pub struct GpioHaptic<P: OutputPin> {
    pin: P,
    on: bool,
}

impl<P: OutputPin> GpioHaptic<P> {
    /// Take ownership of the motor pin and drive it low.
    pub fn new(mut pin: P) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self { pin, on: false })
    }

    /// Last successfully commanded state.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> HapticActuator for GpioHaptic<P> {
    type Error = P::Error;

    fn set_haptic(&mut self, on: bool) -> Result<(), Self::Error> {
        if on {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.on = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};
    use embedded_hal_mock::eh1::MockError;

    #[test]
    fn test_new_drives_pin_low() {
        let mut pin = PinMock::new(&[Transaction::set(State::Low)]);
        let haptic = GpioHaptic::new(pin.clone()).unwrap();
        assert!(!haptic.is_on());
        pin.done();
    }

    #[test]
    fn test_new_reports_pin_error() {
        let mut pin = PinMock::new(&[Transaction::set(State::Low)
            .with_error(MockError::Io(std::io::ErrorKind::NotConnected))]);
        assert!(GpioHaptic::new(pin.clone()).is_err());
        pin.done();
    }

    #[test]
    fn test_pulse_on_then_off() {
        let mut pin = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ]);
        let mut haptic = GpioHaptic::new(pin.clone()).unwrap();

        haptic.set_haptic(true).unwrap();
        assert!(haptic.is_on());
        haptic.set_haptic(false).unwrap();
        assert!(!haptic.is_on());
        pin.done();
    }

    #[test]
    fn test_pin_error_keeps_state() {
        let mut pin = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High)
                .with_error(MockError::Io(std::io::ErrorKind::NotConnected)),
        ]);
        let mut haptic = GpioHaptic::new(pin.clone()).unwrap();

        assert!(haptic.set_haptic(true).is_err());
        assert!(!haptic.is_on());
        pin.done();
    }
}
