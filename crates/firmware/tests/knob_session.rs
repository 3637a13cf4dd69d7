//! End-to-end: encoder pin levels → KnobService → shared cells → Controller.
//!
//! Runs the encoder service and the control loop interleaved at 1 ms, the way
//! the two hardware tasks do, against recording mocks.
//!
//! Run with: cargo test -p firmware --test knob_session

use firmware::input::{InputBuilder, KnobService, PinLevels};
use interaction::{Controller, InteractionConfig, Phase};
use platform::mocks::{MockClock, MockHaptic, MockHost, MockLight};
use platform::{ButtonLatch, HostCommand, RotationCounter, Rgb, SharedInput};

/// One detent clockwise: a full Gray-code cycle from rest.
const CLOCKWISE: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];
/// One detent counter-clockwise.
const COUNTER_CLOCKWISE: [(bool, bool); 4] =
    [(true, false), (true, true), (false, true), (false, false)];

struct Rig<'a> {
    clock: &'a MockClock,
    service: KnobService<'a>,
    knob: Controller<SharedInput<'a>, &'a MockClock, MockLight, MockHaptic, MockHost>,
}

impl<'a> Rig<'a> {
    fn new(clock: &'a MockClock, rotation: &'a RotationCounter, button: &'a ButtonLatch) -> Self {
        let config = InputBuilder::encoder().steps_per_notch(4).build();
        let knob = Controller::new(
            InteractionConfig::default(),
            SharedInput::new(rotation, button),
            clock,
            MockLight::new(),
            MockHaptic::new(),
            MockHost::new(),
        )
        .unwrap();
        Self {
            clock,
            service: KnobService::new(config, rotation, button),
            knob,
        }
    }

    /// One millisecond: service the pins, then run the control loop.
    fn ms(&mut self, levels: PinLevels) {
        self.service.service(levels);
        self.knob.tick().unwrap();
        self.clock.advance_millis(1);
    }

    fn turn(&mut self, cycle: [(bool, bool); 4]) {
        for (a, b) in cycle {
            self.ms(PinLevels::encoder(a, b));
        }
    }

    fn idle(&mut self, ms: u32) {
        for _ in 0..ms {
            self.ms(PinLevels::default());
        }
    }

    fn press(&mut self, ms: u32) {
        let down = PinLevels {
            button: true,
            ..PinLevels::default()
        };
        for _ in 0..ms {
            self.ms(down);
        }
    }
}

#[test]
fn counter_clockwise_detent_turns_volume_down() {
    let clock = MockClock::new();
    let (rotation, button) = (RotationCounter::new(), ButtonLatch::new());
    let mut rig = Rig::new(&clock, &rotation, &button);

    rig.turn(COUNTER_CLOCKWISE);

    assert_eq!(rig.knob.host().commands(), &[HostCommand::VolumeDown]);
    assert_eq!(rig.knob.machine().level().get(), -1);
    assert_eq!(rig.knob.machine().level().magnitude(), 1);
    assert_eq!(rig.knob.light().last().map(|(c, _)| c), Some(Rgb::RED));
    assert!(rig.knob.haptic().is_on());
}

#[test]
fn partial_detent_sends_nothing() {
    let clock = MockClock::new();
    let (rotation, button) = (RotationCounter::new(), ButtonLatch::new());
    let mut rig = Rig::new(&clock, &rotation, &button);

    for (a, b) in CLOCKWISE.into_iter().take(3) {
        rig.ms(PinLevels::encoder(a, b));
    }
    // Contacts stay where the hand left them, between detents.
    for _ in 0..10 {
        rig.ms(PinLevels::encoder(true, false));
    }

    assert!(rig.knob.host().commands().is_empty());
    assert_eq!(rig.knob.machine().phase(), Phase::Idle);
}

#[test]
fn three_detents_then_decay() {
    let clock = MockClock::new();
    let (rotation, button) = (RotationCounter::new(), ButtonLatch::new());
    let mut rig = Rig::new(&clock, &rotation, &button);

    for _ in 0..3 {
        rig.turn(CLOCKWISE);
    }
    assert_eq!(rig.knob.host().commands(), &[HostCommand::VolumeUp; 3]);
    assert_eq!(rig.knob.machine().level().get(), 3);

    rig.idle(100);
    assert!(!rig.knob.haptic().is_on());
    assert_eq!(rig.knob.machine().phase(), Phase::Decaying);

    rig.idle(600);
    assert_eq!(rig.knob.machine().phase(), Phase::Idle);
    assert_eq!(rig.knob.machine().level().get(), 0);
    assert_eq!(rig.knob.light().last(), Some((Rgb::BLACK, 0)));
}

#[test]
fn click_mutes_after_double_click_window() {
    let clock = MockClock::new();
    let (rotation, button) = (RotationCounter::new(), ButtonLatch::new());
    let mut rig = Rig::new(&clock, &rotation, &button);

    rig.turn(COUNTER_CLOCKWISE);
    rig.turn(COUNTER_CLOCKWISE);
    rig.press(60);
    rig.idle(100);
    // Still inside the 400 ms double-click window.
    assert_eq!(rig.knob.host().commands(), &[HostCommand::VolumeDown; 2]);

    rig.idle(400);
    assert_eq!(
        rig.knob.host().commands(),
        &[HostCommand::VolumeDown, HostCommand::VolumeDown, HostCommand::Mute]
    );
    assert_eq!(rig.knob.machine().level().get(), 9);
    assert_eq!(rig.knob.light().last().map(|(c, _)| c), Some(Rgb::BLUE));
}

#[test]
fn double_click_is_ignored_by_the_core() {
    let clock = MockClock::new();
    let (rotation, button) = (RotationCounter::new(), ButtonLatch::new());
    let mut rig = Rig::new(&clock, &rotation, &button);

    rig.press(50);
    rig.idle(50);
    rig.press(50);
    rig.idle(1_000);

    assert!(rig.knob.host().commands().is_empty());
    assert_eq!(rig.knob.machine().level().get(), 0);
}
