//! Delta accumulator.
//!
//! Folds raw encoder deltas into a running position and reports the net
//! change since the position was last acknowledged. The acknowledged
//! position carries the timestamp the decay policy measures from.

use embassy_time::Instant;

use crate::timestamped::TimestampedValue;

/// Running encoder position plus the last acknowledged snapshot of it.
#[derive(Debug, Clone, Default)]
pub struct DeltaAccumulator {
    position: i64,
    acknowledged: TimestampedValue<i64>,
}

impl DeltaAccumulator {
    /// Position 0, acknowledged at boot.
    pub const fn new() -> Self {
        Self {
            position: 0,
            acknowledged: TimestampedValue::new(0),
        }
    }

    /// Fold `delta` into the position and return the net change since the
    /// last [`acknowledge`](Self::acknowledge). Zero means "nothing new".
    pub fn observe_raw_delta(&mut self, delta: i32) -> i64 {
        self.position = self.position.saturating_add(i64::from(delta));
        self.net_change()
    }

    /// Net change since the last acknowledgement, without observing anything.
    pub fn net_change(&self) -> i64 {
        self.position.saturating_sub(*self.acknowledged.get())
    }

    /// Accept the current position and stamp it with `now`.
    pub fn acknowledge(&mut self, now: Instant) {
        self.acknowledged.set(self.position, now);
    }

    /// Refresh the change timestamp while keeping the acknowledged position.
    ///
    /// Used by mute: the click counts as activity but the encoder did not move.
    pub fn touch(&mut self, now: Instant) {
        self.acknowledged.touch(now);
    }

    /// Running position.
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Last acknowledged position.
    pub const fn acknowledged(&self) -> i64 {
        *self.acknowledged.get()
    }

    /// When the last acknowledgement or touch happened.
    pub const fn last_change(&self) -> Instant {
        self.acknowledged.timestamp()
    }
}
