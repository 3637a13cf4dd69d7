//! Interaction state machine
//!
//! Turns one tick's worth of input (net rotation, button snapshot, current
//! time) into at most one feedback event plus any decay transitions. The
//! machine does no I/O; [`Controller`](crate::Controller) applies its output
//! to the collaborators.
//!
//! # Tick order
//!
//! 1. Rotation is folded into the [`DeltaAccumulator`]. A non-zero net change
//!    produces an increase or decrease event and the button is not consulted.
//! 2. Otherwise a `Clicked` button produces a mute event.
//! 3. Otherwise an `Idle` button lets the [`DecayPolicy`] run. Any other
//!    button state leaves everything as it is.
//!
//! # Phases
//!
//! ```text
//!          rotation / click
//!   ┌───────────────────────────┐
//!   ▼                           │
//! Active* ──haptic window──▶ Decaying ──visual window──▶ Idle
//! ```
//!
//! The phase is derived from what is still switched on, not stored.

use embassy_time::Instant;
use platform::ButtonState;

use crate::accumulator::DeltaAccumulator;
use crate::config::InteractionConfig;
use crate::decay::DecayPolicy;
use crate::feedback::FeedbackKind;
use crate::intensity::{IntensityLevel, IntensityRegister};

/// One tick's input snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInput {
    /// Signed rotation since the previous read
    pub net_rotation: i32,
    /// Debounced button state
    pub button: ButtonState,
    /// Current time
    pub now: Instant,
}

/// Feedback-producing event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionEvent {
    /// What happened
    pub kind: FeedbackKind,
    /// Intensity after the event
    pub level: IntensityLevel,
    /// Net encoder change that caused it; 0 for mute
    pub net_change: i64,
}

/// Outcome of one tick
///
/// An event and a decay transition never appear together: decay only runs on
/// ticks without input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// Event to render, if any
    pub event: Option<InteractionEvent>,
    /// The haptic window just closed; switch the motor off
    pub haptic_off: bool,
    /// The visual window just closed; switch the light off (level is now 0)
    pub lights_off: bool,
}

impl Step {
    const fn event(event: InteractionEvent) -> Self {
        Self {
            event: Some(event),
            haptic_off: false,
            lights_off: false,
        }
    }

    /// `true` when the tick needs no output at all.
    pub const fn is_quiet(&self) -> bool {
        self.event.is_none() && !self.haptic_off && !self.lights_off
    }
}

/// Named state of the feedback outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Last event was a rotation; light on, motor on
    ActiveAdjusting,
    /// Last event was a mute click; light on, motor on
    ActiveMuted,
    /// Motor off, light still on
    Decaying,
    /// Everything off, level 0
    Idle,
}

impl Phase {
    /// Short name for logging
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActiveAdjusting => "active-adjusting",
            Self::ActiveMuted => "active-muted",
            Self::Decaying => "decaying",
            Self::Idle => "idle",
        }
    }
}

/// The decision core: owns the intensity register and the accumulator.
#[derive(Debug, Clone)]
pub struct InteractionStateMachine {
    register: IntensityRegister,
    accumulator: DeltaAccumulator,
    policy: DecayPolicy,
    haptic_active: bool,
    lit: bool,
    last_kind: Option<FeedbackKind>,
}

impl InteractionStateMachine {
    /// Idle machine using `policy`.
    pub const fn new(policy: DecayPolicy) -> Self {
        Self {
            register: IntensityRegister::new(),
            accumulator: DeltaAccumulator::new(),
            policy,
            haptic_active: false,
            lit: false,
            last_kind: None,
        }
    }

    /// Idle machine using the windows in `config`.
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(DecayPolicy::from_config(config))
    }

    /// Run one full tick.
    ///
    /// `input.button` is ignored whenever the rotation produces a net change.
    pub fn step(&mut self, input: TickInput) -> Step {
        match self.observe_rotation(input.net_rotation, input.now) {
            Some(step) => step,
            None => self.observe_button(input.button, input.now),
        }
    }

    /// First half of a tick: fold in `delta`.
    ///
    /// Returns `None` when there is no net change, in which case the caller
    /// must follow up with [`observe_button`](Self::observe_button).
    pub fn observe_rotation(&mut self, delta: i32, now: Instant) -> Option<Step> {
        let net = self.accumulator.observe_raw_delta(delta);
        if net == 0 {
            return None;
        }

        let (kind, level) = if net < 0 {
            (FeedbackKind::Decrease, self.register.decrease())
        } else {
            (FeedbackKind::Increase, self.register.increase())
        };
        self.accumulator.acknowledge(now);

        debug!("{}: net {} level {}", kind.as_str(), net, level.get());
        Some(Step::event(self.activate(kind, level, net)))
    }

    /// Second half of a tick, only valid after a rotation without net change.
    pub fn observe_button(&mut self, button: ButtonState, now: Instant) -> Step {
        match button {
            ButtonState::Clicked => {
                let level = self.register.mute();
                self.accumulator.touch(now);

                debug!("mute: level {}", level.get());
                Step::event(self.activate(FeedbackKind::Mute, level, 0))
            }
            ButtonState::Idle => self.decay(now),
            other => {
                trace!("button {} ignored", other.as_str());
                Step::default()
            }
        }
    }

    fn activate(&mut self, kind: FeedbackKind, level: IntensityLevel, net: i64) -> InteractionEvent {
        self.haptic_active = true;
        self.lit = true;
        self.last_kind = Some(kind);
        InteractionEvent {
            kind,
            level,
            net_change: net,
        }
    }

    fn decay(&mut self, now: Instant) -> Step {
        let last = self.accumulator.last_change();
        let mut step = Step::default();

        if self.haptic_active && self.policy.haptic_expired(last, now) {
            self.haptic_active = false;
            step.haptic_off = true;
            debug!("haptic window closed");
        }

        if self.lit && self.policy.visual_expired(last, now) {
            self.register.reset();
            self.lit = false;
            self.last_kind = None;
            step.lights_off = true;
            debug!("visual window closed, level reset");
        }

        step
    }

    /// The motor could not be switched off; report `haptic_off` again on the
    /// next idle tick.
    pub fn haptic_off_failed(&mut self) {
        self.haptic_active = true;
    }

    /// The light could not be switched off; report `lights_off` again on the
    /// next idle tick. The level stays at zero.
    pub fn lights_off_failed(&mut self) {
        self.lit = true;
    }

    /// Current intensity level
    pub const fn level(&self) -> IntensityLevel {
        self.register.level()
    }

    /// Time of the last rotation or click
    pub const fn last_change(&self) -> Instant {
        self.accumulator.last_change()
    }

    /// Running encoder position
    pub const fn position(&self) -> i64 {
        self.accumulator.position()
    }

    /// Decay windows in use
    pub const fn policy(&self) -> &DecayPolicy {
        &self.policy
    }

    /// Named phase derived from which outputs are still on.
    pub fn phase(&self) -> Phase {
        if self.haptic_active {
            match self.last_kind {
                Some(FeedbackKind::Mute) => Phase::ActiveMuted,
                _ => Phase::ActiveAdjusting,
            }
        } else if self.lit {
            Phase::Decaying
        } else {
            Phase::Idle
        }
    }
}

impl Default for InteractionStateMachine {
    fn default() -> Self {
        Self::new(DecayPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64, net_rotation: i32, button: ButtonState) -> TickInput {
        TickInput {
            net_rotation,
            button,
            now: Instant::from_millis(ms),
        }
    }

    #[test]
    fn test_starts_idle() {
        let machine = InteractionStateMachine::default();
        assert_eq!(machine.phase(), Phase::Idle);
        assert!(machine.level().is_zero());
    }

    #[test]
    fn test_idle_machine_stays_quiet() {
        let mut machine = InteractionStateMachine::default();
        for ms in (0..5_000).step_by(100) {
            assert!(machine.step(at(ms, 0, ButtonState::Idle)).is_quiet());
        }
    }

    #[test]
    fn test_rotation_wins_over_click() {
        let mut machine = InteractionStateMachine::default();
        let step = machine.step(at(10, 1, ButtonState::Clicked));
        let event = step.event.unwrap();

        assert_eq!(event.kind, FeedbackKind::Increase);
        assert_eq!(event.level.get(), 1);
        assert_eq!(machine.phase(), Phase::ActiveAdjusting);
    }

    #[test]
    fn test_click_mutes_and_touches() {
        let mut machine = InteractionStateMachine::default();
        machine.step(at(10, -3, ButtonState::Idle));
        let step = machine.step(at(20, 0, ButtonState::Clicked));

        assert_eq!(step.event.unwrap().kind, FeedbackKind::Mute);
        assert_eq!(machine.level(), IntensityLevel::MUTED);
        assert_eq!(machine.last_change(), Instant::from_millis(20));
        assert_eq!(machine.position(), -3);
        assert_eq!(machine.phase(), Phase::ActiveMuted);
    }

    #[test]
    fn test_unhandled_button_is_noop() {
        let mut machine = InteractionStateMachine::default();
        machine.step(at(0, 1, ButtonState::Idle));
        for state in [
            ButtonState::Pressed,
            ButtonState::Held,
            ButtonState::Released,
            ButtonState::DoubleClicked,
        ] {
            // Well past both windows, but decay only runs on Idle.
            assert!(machine.step(at(10_000, 0, state)).is_quiet());
        }
        assert_eq!(machine.phase(), Phase::ActiveAdjusting);
        assert_eq!(machine.level().get(), 1);
    }

    #[test]
    fn test_decay_is_edge_triggered() {
        let mut machine = InteractionStateMachine::default();
        machine.step(at(1_000, 2, ButtonState::Idle));

        let haptic = machine.step(at(1_031, 0, ButtonState::Idle));
        assert!(haptic.haptic_off && !haptic.lights_off);
        assert_eq!(machine.phase(), Phase::Decaying);
        assert!(machine.step(at(1_100, 0, ButtonState::Idle)).is_quiet());

        let visual = machine.step(at(1_601, 0, ButtonState::Idle));
        assert!(visual.lights_off && !visual.haptic_off);
        assert!(machine.level().is_zero());
        assert_eq!(machine.phase(), Phase::Idle);
        assert!(machine.step(at(2_000, 0, ButtonState::Idle)).is_quiet());
    }

    #[test]
    fn test_failed_off_writes_are_reported_again() {
        let mut machine = InteractionStateMachine::default();
        machine.step(at(0, 1, ButtonState::Idle));

        assert!(machine.step(at(31, 0, ButtonState::Idle)).haptic_off);
        machine.haptic_off_failed();
        assert!(machine.step(at(32, 0, ButtonState::Idle)).haptic_off);
        assert!(machine.step(at(33, 0, ButtonState::Idle)).is_quiet());

        assert!(machine.step(at(601, 0, ButtonState::Idle)).lights_off);
        machine.lights_off_failed();
        let retry = machine.step(at(602, 0, ButtonState::Idle));
        assert!(retry.lights_off && !retry.haptic_off);
        assert!(machine.level().is_zero());
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn test_long_gap_closes_both_windows_at_once() {
        let mut machine = InteractionStateMachine::default();
        machine.step(at(0, 0, ButtonState::Clicked));
        let step = machine.step(at(5_000, 0, ButtonState::Idle));
        assert!(step.haptic_off && step.lights_off);
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn test_rotation_that_cancels_out_is_no_event() {
        let mut machine = InteractionStateMachine::default();
        assert!(machine.observe_rotation(0, Instant::from_millis(1)).is_none());
        machine.step(at(2, 4, ButtonState::Idle));
        // Accumulated position is acknowledged, the next zero delta is silent.
        assert!(machine.observe_rotation(0, Instant::from_millis(3)).is_none());
    }
}
