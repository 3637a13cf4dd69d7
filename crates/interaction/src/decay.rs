//! Feedback decay policy.
//!
//! Two independent idle windows measured from the last change: a short one
//! after which the haptic motor stops, and a longer one after which the light
//! goes dark and the intensity level returns to zero.

use embassy_time::{Duration, Instant};

use crate::config::InteractionConfig;

/// Time thresholds for silencing feedback.
///
/// Both checks are strict: a window expires once *more* than its timeout has
/// passed, so at exactly `last + timeout` the output is still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayPolicy {
    haptic_timeout: Duration,
    visual_timeout: Duration,
}

impl DecayPolicy {
    /// Policy with explicit windows.
    pub const fn new(haptic_timeout: Duration, visual_timeout: Duration) -> Self {
        Self {
            haptic_timeout,
            visual_timeout,
        }
    }

    /// Policy taken from a validated configuration.
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.haptic_timeout(), config.visual_timeout())
    }

    /// Haptic window length.
    pub const fn haptic_timeout(&self) -> Duration {
        self.haptic_timeout
    }

    /// Visual window length.
    pub const fn visual_timeout(&self) -> Duration {
        self.visual_timeout
    }

    /// `true` once more than the haptic timeout has passed since `last`.
    pub fn haptic_expired(&self, last: Instant, now: Instant) -> bool {
        now.saturating_duration_since(last) > self.haptic_timeout
    }

    /// `true` once more than the visual timeout has passed since `last`.
    pub fn visual_expired(&self, last: Instant, now: Instant) -> bool {
        now.saturating_duration_since(last) > self.visual_timeout
    }
}

impl Default for DecayPolicy {
    fn default() -> Self {
        Self::from_config(&InteractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> DecayPolicy {
        DecayPolicy::new(Duration::from_millis(30), Duration::from_millis(600))
    }

    #[test]
    fn test_haptic_boundary_is_strict() {
        let p = policy();
        let last = Instant::from_millis(100);
        assert!(!p.haptic_expired(last, Instant::from_millis(130)));
        assert!(p.haptic_expired(last, Instant::from_millis(131)));
    }

    #[test]
    fn test_visual_boundary_is_strict() {
        let p = policy();
        let last = Instant::from_millis(100);
        assert!(!p.visual_expired(last, Instant::from_millis(700)));
        assert!(p.visual_expired(last, Instant::from_millis(701)));
    }

    #[test]
    fn test_between_windows() {
        let p = policy();
        let last = Instant::from_millis(0);
        let now = Instant::from_millis(200);
        assert!(p.haptic_expired(last, now));
        assert!(!p.visual_expired(last, now));
    }

    #[test]
    fn test_clock_before_last_change_never_expires() {
        let p = policy();
        let last = Instant::from_millis(5_000);
        assert!(!p.haptic_expired(last, Instant::from_millis(0)));
        assert!(!p.visual_expired(last, Instant::from_millis(0)));
    }

    #[test]
    fn test_default_matches_tuned_constants() {
        let p = DecayPolicy::default();
        assert_eq!(p.haptic_timeout(), Duration::from_millis(30));
        assert_eq!(p.visual_timeout(), Duration::from_millis(600));
    }
}
