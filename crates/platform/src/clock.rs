//! Monotonic time source

use embassy_time::Instant;

/// Monotonic millisecond-resolution clock.
pub trait Clock {
    /// Current time since boot.
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by the embassy-time driver of the running target.
///
/// Hardware builds get the TIM2 time driver from `embassy-stm32`; host
/// builds need embassy-time's `std` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
