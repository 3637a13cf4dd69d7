//! Haptic actuator abstraction

/// Binary vibration motor.
///
/// Writes are idempotent: switching an actuator off that is already off is
/// harmless.
pub trait HapticActuator {
    /// Error type for actuator writes
    type Error: core::fmt::Debug;

    /// Drive the motor on (`true`) or off (`false`).
    fn set_haptic(&mut self, on: bool) -> Result<(), Self::Error>;
}
