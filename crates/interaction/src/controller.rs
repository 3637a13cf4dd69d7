//! Controller: the per-pass entry point wiring the state machine to its
//! collaborators.
//!
//! ```
//! use interaction::{Controller, InteractionConfig};
//! use platform::mocks::{MockClock, MockHaptic, MockHost, MockInput, MockLight};
//! use platform::HostCommand;
//!
//! let clock = MockClock::new();
//! let mut input = MockInput::new();
//! input.push_rotation(1).unwrap();
//!
//! let mut knob = Controller::new(
//!     InteractionConfig::default(),
//!     input,
//!     &clock,
//!     MockLight::new(),
//!     MockHaptic::new(),
//!     MockHost::new(),
//! )?;
//! knob.tick().unwrap();
//! assert_eq!(knob.host().commands(), &[HostCommand::VolumeUp]);
//! # Ok::<(), interaction::ConfigError>(())
//! ```

use core::fmt::Debug;

use platform::{Clock, HapticActuator, HostCommandSink, LightStrip, RotaryInput};

use crate::config::{ConfigError, InteractionConfig};
use crate::feedback::brightness;
use crate::intensity::IntensityLevel;
use crate::machine::{InteractionStateMachine, Phase, Step};

/// A collaborator write failed during a tick.
///
/// The state update of that tick is already committed; the remaining writes
/// were still attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TickError<L: Debug, H: Debug, C: Debug> {
    /// Light strip write failed
    #[error("light strip write failed: {0:?}")]
    Light(L),
    /// Haptic actuator write failed
    #[error("haptic write failed: {0:?}")]
    Haptic(H),
    /// Host command could not be delivered
    #[error("host command failed: {0:?}")]
    Command(C),
}

impl<L: Debug, H: Debug, C: Debug> TickError<L, H, C> {
    /// Which collaborator failed, for logging
    pub const fn channel(&self) -> &'static str {
        match self {
            Self::Light(_) => "light",
            Self::Haptic(_) => "haptic",
            Self::Command(_) => "command",
        }
    }
}

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Event and decay transitions of this tick
    pub step: Step,
    /// Phase after the tick
    pub phase: Phase,
    /// Intensity after the tick
    pub level: IntensityLevel,
}

/// Error type of [`Controller::tick`] for a given set of collaborators.
pub type ControllerError<L, H, C> = TickError<
    <L as LightStrip>::Error,
    <H as HapticActuator>::Error,
    <C as HostCommandSink>::Error,
>;

/// Owns the collaborators and the state machine; call [`tick`](Self::tick)
/// once per main-loop pass.
pub struct Controller<I, K, L, H, C> {
    config: InteractionConfig,
    machine: InteractionStateMachine,
    input: I,
    clock: K,
    light: L,
    haptic: H,
    host: C,
}

impl<I, K, L, H, C> Controller<I, K, L, H, C>
where
    I: RotaryInput,
    K: Clock,
    L: LightStrip,
    H: HapticActuator,
    C: HostCommandSink,
{
    /// Validate `config` and assemble an idle controller.
    pub fn new(
        config: InteractionConfig,
        input: I,
        clock: K,
        light: L,
        haptic: H,
        host: C,
    ) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        info!(
            "interaction: haptic {} ms, visual {} ms, divisor {}",
            config.haptic_timeout().as_millis(),
            config.visual_timeout().as_millis(),
            config.divisor()
        );
        Ok(Self {
            machine: InteractionStateMachine::from_config(&config),
            config,
            input,
            clock,
            light,
            haptic,
            host,
        })
    }

    /// Drive every output to its idle value. Call once after power-up.
    pub fn blank_outputs(&mut self) -> Result<(), ControllerError<L, H, C>> {
        let mut first = None;
        let off = self.config.colors().off;
        record(&mut first, self.light.set_light(off, 0).map_err(TickError::Light));
        record(&mut first, self.haptic.set_haptic(false).map_err(TickError::Haptic));
        first.map_or(Ok(()), Err)
    }

    /// One main-loop pass: read input, step the machine, write outputs.
    ///
    /// The button is read only when the rotation nets to zero, so a click
    /// arriving during a turn stays latched for a later pass.
    pub fn tick(&mut self) -> Result<TickReport, ControllerError<L, H, C>> {
        let now = self.clock.now();
        let delta = self.input.read_net_rotation();
        let step = match self.machine.observe_rotation(delta, now) {
            Some(step) => step,
            None => {
                let button = self.input.read_button();
                self.machine.observe_button(button, now)
            }
        };

        let applied = self.apply(&step);
        let report = TickReport {
            step,
            phase: self.machine.phase(),
            level: self.machine.level(),
        };
        applied.map(|()| report)
    }

    fn apply(&mut self, step: &Step) -> Result<(), ControllerError<L, H, C>> {
        let mut first = None;

        if let Some(event) = step.event {
            let color = self.config.colors().color(event.kind);
            let level = brightness(event.level, self.config.divisor());
            record(&mut first, self.light.set_light(color, level).map_err(TickError::Light));
            record(&mut first, self.haptic.set_haptic(true).map_err(TickError::Haptic));
            record(
                &mut first,
                self.host
                    .emit_command(event.kind.command())
                    .map_err(TickError::Command),
            );
        }

        // A failed off-write leaves the output on; hand it back to the
        // machine so the next idle tick retries.
        if step.haptic_off {
            if let Err(e) = self.haptic.set_haptic(false) {
                self.machine.haptic_off_failed();
                record(&mut first, Err(TickError::Haptic(e)));
            }
        }

        if step.lights_off {
            let off = self.config.colors().off;
            if let Err(e) = self.light.set_light(off, 0) {
                self.machine.lights_off_failed();
                record(&mut first, Err(TickError::Light(e)));
            }
        }

        match first {
            Some(err) => {
                warn!("{} write failed", err.channel());
                Err(err)
            }
            None => Ok(()),
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Current intensity level
    pub fn level(&self) -> IntensityLevel {
        self.machine.level()
    }

    /// Active configuration
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The state machine, read-only
    pub fn machine(&self) -> &InteractionStateMachine {
        &self.machine
    }

    /// Input collaborator, mutable for scripting
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Light collaborator
    pub fn light(&self) -> &L {
        &self.light
    }

    /// Light collaborator, mutable
    pub fn light_mut(&mut self) -> &mut L {
        &mut self.light
    }

    /// Haptic collaborator
    pub fn haptic(&self) -> &H {
        &self.haptic
    }

    /// Haptic collaborator, mutable
    pub fn haptic_mut(&mut self) -> &mut H {
        &mut self.haptic
    }

    /// Host command collaborator
    pub fn host(&self) -> &C {
        &self.host
    }

    /// Host command collaborator, mutable
    pub fn host_mut(&mut self) -> &mut C {
        &mut self.host
    }
}

/// Keep the first error, drop the rest.
fn record<E>(first: &mut Option<E>, result: Result<(), E>) {
    if let Err(err) = result {
        if first.is_none() {
            *first = Some(err);
        }
    }
}
