//! A value paired with the time it last changed.

use embassy_time::{Duration, Instant};

/// `value` plus the instant it was last set or touched.
///
/// Starts stamped at boot (`t = 0`), so a freshly created value already looks
/// "old" to timeout checks once the process has been up for a while.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampedValue<T> {
    value: T,
    timestamp: Instant,
}

impl<T> TimestampedValue<T> {
    /// Wrap `value`, stamped at boot.
    pub const fn new(value: T) -> Self {
        Self {
            value,
            timestamp: Instant::from_ticks(0),
        }
    }

    /// Replace the value and stamp it with `now`.
    pub fn set(&mut self, value: T, now: Instant) {
        self.value = value;
        self.touch(now);
    }

    /// Refresh the timestamp without changing the value.
    pub fn touch(&mut self, now: Instant) {
        self.timestamp = now;
    }

    /// Borrow the value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// When the value was last set or touched.
    pub const fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Time since the last set or touch; zero if `now` is earlier.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.timestamp)
    }
}

impl<T: Default> Default for TimestampedValue<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_stamped_at_boot() {
        let v = TimestampedValue::new(7_i64);
        assert_eq!(*v.get(), 7);
        assert_eq!(v.timestamp(), Instant::from_ticks(0));
    }

    #[test]
    fn test_set_stamps() {
        let mut v = TimestampedValue::new(0_i64);
        v.set(3, Instant::from_millis(100));
        assert_eq!(*v.get(), 3);
        assert_eq!(v.timestamp(), Instant::from_millis(100));
    }

    #[test]
    fn test_touch_keeps_value() {
        let mut v = TimestampedValue::new(5_i64);
        v.touch(Instant::from_millis(40));
        assert_eq!(*v.get(), 5);
        assert_eq!(v.elapsed(Instant::from_millis(70)), Duration::from_millis(30));
    }

    #[test]
    fn test_elapsed_saturates_for_earlier_now() {
        let mut v = TimestampedValue::new(());
        v.touch(Instant::from_millis(500));
        assert_eq!(v.elapsed(Instant::from_millis(100)), Duration::from_ticks(0));
    }
}
