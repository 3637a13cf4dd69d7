//! Desktop emulator: the real [`Controller`] against logging outputs and a
//! scripted knob.
//!
//! Two ways to run a [`Script`]:
//!
//! - [`run_virtual`] steps a [`MockClock`] one millisecond per tick and
//!   returns as fast as the CPU allows. Deterministic; used by tests.
//! - [`run_realtime`] ticks on a tokio interval against the embassy std
//!   clock, so the log reads the way the device behaves.
//!
//! ```
//! use firmware::emulator::{run_virtual, Script};
//! use interaction::InteractionConfig;
//! use platform::HostCommand;
//!
//! let script = Script::new().rotate_at(0, 1).click_at(100);
//! let session = run_virtual(InteractionConfig::default(), script, 1_000)?;
//! assert_eq!(session.host.commands(), &[HostCommand::VolumeUp, HostCommand::Mute]);
//! assert!(!session.haptic.is_on());
//! # Ok::<(), interaction::ConfigError>(())
//! ```

use std::collections::VecDeque;
use std::convert::Infallible;

use embassy_time::{Duration, Instant};
use interaction::{ConfigError, Controller, InteractionConfig, InteractionEvent, TickReport};
use platform::mocks::MockClock;
use platform::{
    ButtonState, Clock, EmbassyClock, HapticActuator, HostCommand, HostCommandSink, LightStrip,
    RotaryInput, Rgb,
};

/// Light strip that logs every frame.
#[derive(Debug, Clone, Default)]
pub struct TracingLight {
    frames: Vec<(Rgb, u8)>,
}

impl TracingLight {
    /// Strip with no frames written yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame written, oldest first.
    pub fn frames(&self) -> &[(Rgb, u8)] {
        &self.frames
    }

    /// Colour and brightness currently shown.
    pub fn current(&self) -> Option<(Rgb, u8)> {
        self.frames.last().copied()
    }

    /// `true` while the ring emits light.
    pub fn is_lit(&self) -> bool {
        self.current()
            .is_some_and(|(color, brightness)| brightness > 0 && !color.is_black())
    }
}

impl LightStrip for TracingLight {
    type Error = Infallible;

    fn set_light(&mut self, color: Rgb, brightness: u8) -> Result<(), Self::Error> {
        tracing::info!(
            target: "knob::light",
            r = color.r,
            g = color.g,
            b = color.b,
            brightness,
            "ring"
        );
        self.frames.push((color, brightness));
        Ok(())
    }
}

/// Vibration motor that logs every switch.
#[derive(Debug, Clone, Default)]
pub struct TracingHaptic {
    on: bool,
    pulses: usize,
}

impl TracingHaptic {
    /// Motor at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current motor state.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Off → on transitions seen.
    pub fn pulses(&self) -> usize {
        self.pulses
    }
}

impl HapticActuator for TracingHaptic {
    type Error = Infallible;

    fn set_haptic(&mut self, on: bool) -> Result<(), Self::Error> {
        if on && !self.on {
            self.pulses = self.pulses.saturating_add(1);
        }
        if on != self.on {
            tracing::info!(target: "knob::haptic", on, "motor");
        }
        self.on = on;
        Ok(())
    }
}

/// Host that logs every media key it receives.
#[derive(Debug, Clone, Default)]
pub struct TracingHost {
    commands: Vec<HostCommand>,
}

impl TracingHost {
    /// Host with no commands received.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received, oldest first.
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }
}

impl HostCommandSink for TracingHost {
    type Error = Infallible;

    fn emit_command(&mut self, command: HostCommand) -> Result<(), Self::Error> {
        tracing::info!(target: "knob::host", key = command.as_str(), "consumer control");
        self.commands.push(command);
        Ok(())
    }
}

/// One scripted knob action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEvent {
    /// Encoder detents, positive clockwise
    Rotate(i32),
    /// Debounced button outcome
    Button(ButtonState),
}

/// Knob actions keyed by milliseconds since session start.
#[derive(Debug, Clone, Default)]
pub struct Script {
    events: Vec<(u64, ScriptEvent)>,
}

impl Script {
    /// Empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn the knob by `delta` detents at `at_ms`.
    #[must_use]
    pub fn rotate_at(self, at_ms: u64, delta: i32) -> Self {
        self.event_at(at_ms, ScriptEvent::Rotate(delta))
    }

    /// Click the button at `at_ms`.
    #[must_use]
    pub fn click_at(self, at_ms: u64) -> Self {
        self.event_at(at_ms, ScriptEvent::Button(ButtonState::Clicked))
    }

    /// Report any button state at `at_ms`.
    #[must_use]
    pub fn button_at(self, at_ms: u64, state: ButtonState) -> Self {
        self.event_at(at_ms, ScriptEvent::Button(state))
    }

    /// Add an event; events at the same time keep their insertion order.
    #[must_use]
    pub fn event_at(mut self, at_ms: u64, event: ScriptEvent) -> Self {
        self.events.push((at_ms, event));
        self
    }

    /// Time of the last event.
    pub fn last_event_ms(&self) -> u64 {
        self.events.iter().map(|(at, _)| *at).max().unwrap_or(0)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// `true` for a script with no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// [`RotaryInput`] replaying a [`Script`] against a clock.
///
/// Events become visible once the clock reaches their time. Rotation due by
/// the time of a read is summed; a button state is latched until read, like
/// [`platform::ButtonLatch`].
pub struct ScriptedInput<K> {
    clock: K,
    origin: Instant,
    events: VecDeque<(u64, ScriptEvent)>,
    pending_button: ButtonState,
}

impl<K: Clock> ScriptedInput<K> {
    /// Replay `script` with time zero at the clock's current instant.
    pub fn new(script: Script, clock: K) -> Self {
        let mut events = script.events;
        events.sort_by_key(|(at, _)| *at);
        Self {
            origin: clock.now(),
            clock,
            events: events.into(),
            pending_button: ButtonState::Idle,
        }
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    fn elapsed_ms(&self) -> u64 {
        self.clock
            .now()
            .saturating_duration_since(self.origin)
            .as_millis()
    }
}

impl<K: Clock> RotaryInput for ScriptedInput<K> {
    fn read_net_rotation(&mut self) -> i32 {
        let now_ms = self.elapsed_ms();
        let mut net: i32 = 0;
        while let Some(&(at, event)) = self.events.front() {
            if at > now_ms {
                break;
            }
            self.events.pop_front();
            match event {
                ScriptEvent::Rotate(delta) => net = net.saturating_add(delta),
                ScriptEvent::Button(state) if state != ButtonState::Idle => {
                    self.pending_button = state;
                }
                ScriptEvent::Button(_) => {}
            }
        }
        net
    }

    fn read_button(&mut self) -> ButtonState {
        core::mem::take(&mut self.pending_button)
    }
}

/// A tick that produced an event or a decay transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedReport {
    /// Milliseconds since session start
    pub at_ms: u64,
    /// What the tick did
    pub report: TickReport,
}

/// Outcome of an emulated session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Non-quiet ticks, in order
    pub reports: Vec<TimedReport>,
    /// Light strip at the end of the session
    pub light: TracingLight,
    /// Motor at the end of the session
    pub haptic: TracingHaptic,
    /// Host at the end of the session
    pub host: TracingHost,
}

impl Session {
    /// Interaction events with their tick times.
    pub fn events(&self) -> impl Iterator<Item = (u64, InteractionEvent)> + '_ {
        self.reports
            .iter()
            .filter_map(|r| r.report.step.event.map(|event| (r.at_ms, event)))
    }

    /// Time of the first tick that switched the motor off.
    pub fn haptic_off_at(&self) -> Option<u64> {
        self.reports
            .iter()
            .find(|r| r.report.step.haptic_off)
            .map(|r| r.at_ms)
    }

    /// Time of the first tick that switched the ring off.
    pub fn lights_off_at(&self) -> Option<u64> {
        self.reports
            .iter()
            .find(|r| r.report.step.lights_off)
            .map(|r| r.at_ms)
    }
}

type EmulatedController<K> =
    Controller<ScriptedInput<K>, K, TracingLight, TracingHaptic, TracingHost>;

fn assemble<K: Clock + Copy>(
    config: InteractionConfig,
    script: Script,
    clock: K,
) -> Result<EmulatedController<K>, ConfigError> {
    let mut knob = Controller::new(
        config,
        ScriptedInput::new(script, clock),
        clock,
        TracingLight::new(),
        TracingHaptic::new(),
        TracingHost::new(),
    )?;
    if let Err(e) = knob.blank_outputs() {
        tracing::warn!("blanking outputs failed: {e}");
    }
    Ok(knob)
}

fn tick_once<K: Clock>(knob: &mut EmulatedController<K>, at_ms: u64, session: &mut Session) {
    match knob.tick() {
        Ok(report) if !report.step.is_quiet() => {
            if let Some(event) = report.step.event {
                tracing::debug!(
                    at_ms,
                    kind = event.kind.as_str(),
                    level = report.level.get(),
                    phase = report.phase.as_str(),
                    "event"
                );
            }
            session.reports.push(TimedReport { at_ms, report });
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(at_ms, "tick failed: {e}"),
    }
}

fn finish<K: Clock>(knob: &EmulatedController<K>, mut session: Session) -> Session {
    session.light = knob.light().clone();
    session.haptic = knob.haptic().clone();
    session.host = knob.host().clone();
    session
}

/// Replay `script` for `duration_ms` milliseconds of virtual time.
///
/// One tick runs at every millisecond from 0 to `duration_ms` inclusive.
pub fn run_virtual(
    config: InteractionConfig,
    script: Script,
    duration_ms: u64,
) -> Result<Session, ConfigError> {
    let clock = MockClock::new();
    let mut knob = assemble(config, script, &clock)?;
    let mut session = Session::default();

    for at_ms in 0..=duration_ms {
        tick_once(&mut knob, at_ms, &mut session);
        clock.advance_millis(1);
    }
    Ok(finish(&knob, session))
}

/// Replay `script` in wall-clock time, one tick per millisecond.
pub async fn run_realtime(
    config: InteractionConfig,
    script: Script,
    duration: Duration,
) -> Result<Session, ConfigError> {
    let clock = EmbassyClock;
    let start = clock.now();
    let mut knob = assemble(config, script, clock)?;
    let mut session = Session::default();

    let mut interval = tokio::time::interval(std::time::Duration::from_millis(1));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        let elapsed = clock.now().saturating_duration_since(start);
        tick_once(&mut knob, elapsed.as_millis(), &mut session);
        if elapsed >= duration {
            break;
        }
    }
    Ok(finish(&knob, session))
}

/// Install a `tracing-subscriber` formatter filtered by `RUST_LOG`
/// (default `info`). Does nothing if a subscriber is already set.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_input_releases_events_on_time() {
        let clock = MockClock::new();
        let script = Script::new().rotate_at(5, 2).rotate_at(5, 1).click_at(7);
        let mut input = ScriptedInput::new(script, &clock);

        assert_eq!(input.read_net_rotation(), 0);
        clock.advance_millis(5);
        assert_eq!(input.read_net_rotation(), 3);
        assert_eq!(input.read_button(), ButtonState::Idle);

        clock.advance_millis(2);
        assert_eq!(input.read_net_rotation(), 0);
        assert_eq!(input.read_button(), ButtonState::Clicked);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_script_is_sorted_by_time() {
        let clock = MockClock::new();
        let script = Script::new().rotate_at(10, -1).rotate_at(2, 1);
        assert_eq!(script.last_event_ms(), 10);
        let mut input = ScriptedInput::new(script, &clock);

        clock.advance_millis(2);
        assert_eq!(input.read_net_rotation(), 1);
    }

    #[test]
    fn test_haptic_counts_pulses() {
        let mut haptic = TracingHaptic::new();
        haptic.set_haptic(true).unwrap();
        haptic.set_haptic(true).unwrap();
        haptic.set_haptic(false).unwrap();
        haptic.set_haptic(true).unwrap();
        assert_eq!(haptic.pulses(), 2);
        assert!(haptic.is_on());
    }

    #[test]
    fn test_virtual_session_decays() {
        let script = Script::new().rotate_at(0, -1);
        let session = run_virtual(InteractionConfig::default(), script, 700).unwrap();

        assert_eq!(session.host.commands(), &[HostCommand::VolumeDown]);
        assert_eq!(session.haptic_off_at(), Some(31));
        assert_eq!(session.lights_off_at(), Some(601));
        assert!(!session.light.is_lit());
    }

    #[tokio::test]
    async fn test_realtime_session_runs() {
        let script = Script::new().rotate_at(0, 1);
        let session = run_realtime(
            InteractionConfig::default(),
            script,
            Duration::from_millis(20),
        )
        .await
        .unwrap();
        assert_eq!(session.host.commands(), &[HostCommand::VolumeUp]);
    }
}
