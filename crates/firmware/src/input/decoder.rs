//! Pure click-encoder logic: quadrature decoding and button classification.
//!
//! Nothing in here touches GPIO. Both state machines are fed sampled pin
//! levels (`true` = contact active) so they run unchanged on the host.
//!
//! # Quadrature
//!
//! The two encoder contacts are folded into a 2-bit Gray-code phase:
//!
//! ```text
//!   A active → 0b11, then B active flips bit 0
//!   phase sequence one way:   0 → 1 → 3 → 2 → 0
//! ```
//!
//! Subtracting the new phase from the previous one (mod 4) gives an odd
//! difference for a valid single-step transition; bit 1 of that difference
//! is the direction. Even differences are either no movement or a skipped
//! phase and are ignored.
//!
//! # Button
//!
//! The button is sampled every few milliseconds. Each sample that sees the
//! contact closed counts towards the hold threshold; on release the press is
//! classified as a click, the second click of a double click, or the end of a
//! hold.

/// Raw quadrature step decoder with detent scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadratureDecoder {
    last_phase: u8,
    steps_per_notch: i32,
    pending: i32,
}

impl QuadratureDecoder {
    /// Decoder reporting one detent every `steps_per_notch` phase steps.
    ///
    /// The first sample is taken as the resting phase.
    pub fn new(steps_per_notch: u8) -> Self {
        Self {
            last_phase: 0,
            steps_per_notch: i32::from(steps_per_notch.max(1)),
            pending: 0,
        }
    }

    /// Gray-code phase for a pair of contact levels.
    pub const fn phase(a: bool, b: bool) -> u8 {
        let base = if a { 0b11 } else { 0b00 };
        if b {
            base ^ 0b01
        } else {
            base
        }
    }

    /// Seed the resting phase without producing a step.
    pub fn prime(&mut self, a: bool, b: bool) {
        self.last_phase = Self::phase(a, b);
    }

    /// Feed one sample; returns the phase step it produced (-1, 0 or +1).
    pub fn sample(&mut self, a: bool, b: bool) -> i8 {
        let phase = Self::phase(a, b);
        let diff = self.last_phase.wrapping_sub(phase);
        if diff & 0b01 == 0 {
            return 0;
        }
        self.last_phase = phase;
        let step = if diff & 0b10 == 0 { -1 } else { 1 };
        self.pending = self.pending.saturating_add(i32::from(step));
        step
    }

    /// Drain whole detents; the remainder stays pending.
    pub fn take_notches(&mut self) -> i32 {
        let notches = self.pending.checked_div(self.steps_per_notch).unwrap_or(0);
        self.pending = self.pending.checked_rem(self.steps_per_notch).unwrap_or(0);
        notches
    }

    /// Phase steps not yet forming a whole detent.
    pub fn pending(&self) -> i32 {
        self.pending
    }
}

/// Classified button outcome of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClickEvent {
    /// Still down past the hold threshold; repeats every sample
    Held,
    /// Let go after a hold
    Released,
    /// Short press, no second press within the window
    Clicked,
    /// Second short press within the window
    DoubleClicked,
}

impl From<ClickEvent> for platform::ButtonState {
    fn from(event: ClickEvent) -> Self {
        match event {
            ClickEvent::Held => Self::Held,
            ClickEvent::Released => Self::Released,
            ClickEvent::Clicked => Self::Clicked,
            ClickEvent::DoubleClicked => Self::DoubleClicked,
        }
    }
}

/// Button classifier driven at the button sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickDetector {
    hold_samples: u32,
    double_click_samples: Option<u32>,
    down_samples: u32,
    holding: bool,
    /// Samples left in which a second click counts as a double click.
    window: u32,
}

impl ClickDetector {
    /// Classifier with thresholds in samples; `None` disables double clicks.
    pub const fn new(hold_samples: u32, double_click_samples: Option<u32>) -> Self {
        Self {
            hold_samples,
            double_click_samples,
            down_samples: 0,
            holding: false,
            window: 0,
        }
    }

    /// `true` while a first click waits for a possible second one.
    pub const fn awaiting_second_click(&self) -> bool {
        self.window > 0
    }

    /// Feed one debounced sample of the contact.
    pub fn sample(&mut self, pressed: bool) -> Option<ClickEvent> {
        if pressed {
            self.down_samples = self.down_samples.saturating_add(1);
            if self.down_samples > self.hold_samples {
                self.holding = true;
                return Some(ClickEvent::Held);
            }
            return None;
        }

        if self.down_samples == 0 {
            return self.tick_window();
        }
        self.down_samples = 0;

        if self.holding {
            self.holding = false;
            self.window = 0;
            return Some(ClickEvent::Released);
        }

        match self.double_click_samples {
            None => Some(ClickEvent::Clicked),
            Some(_) if self.window > 0 => {
                self.window = 0;
                Some(ClickEvent::DoubleClicked)
            }
            Some(window) => {
                self.window = window;
                None
            }
        }
    }

    fn tick_window(&mut self) -> Option<ClickEvent> {
        if self.window == 0 {
            return None;
        }
        self.window = self.window.saturating_sub(1);
        (self.window == 0).then_some(ClickEvent::Clicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One full cycle in the direction that counts up.
    const FORWARD: [(bool, bool); 4] = [(false, true), (true, true), (true, false), (false, false)];

    fn run(decoder: &mut QuadratureDecoder, seq: impl IntoIterator<Item = (bool, bool)>) -> i32 {
        seq.into_iter()
            .map(|(a, b)| i32::from(decoder.sample(a, b)))
            .sum()
    }

    #[test]
    fn test_phase_is_gray_code() {
        assert_eq!(QuadratureDecoder::phase(false, false), 0);
        assert_eq!(QuadratureDecoder::phase(false, true), 1);
        assert_eq!(QuadratureDecoder::phase(true, true), 2);
        assert_eq!(QuadratureDecoder::phase(true, false), 3);
    }

    #[test]
    fn test_full_cycle_counts_four_steps() {
        let mut decoder = QuadratureDecoder::new(1);
        assert_eq!(run(&mut decoder, FORWARD), 4);
        assert_eq!(decoder.take_notches(), 4);
    }

    #[test]
    fn test_reverse_cycle_counts_down() {
        let mut decoder = QuadratureDecoder::new(1);
        let seq = [(true, false), (true, true), (false, true), (false, false)];
        assert_eq!(run(&mut decoder, seq), -4);
        assert_eq!(decoder.take_notches(), -4);
    }

    #[test]
    fn test_steady_levels_do_not_step() {
        let mut decoder = QuadratureDecoder::new(1);
        assert_eq!(run(&mut decoder, [(false, false); 10]), 0);
        decoder.prime(true, true);
        assert_eq!(decoder.sample(true, true), 0);
    }

    #[test]
    fn test_skipped_phase_is_ignored() {
        let mut decoder = QuadratureDecoder::new(1);
        // 0 → 2 changes both contacts at once.
        assert_eq!(decoder.sample(true, true), 0);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn test_steps_per_notch_keeps_remainder() {
        let mut decoder = QuadratureDecoder::new(4);
        run(&mut decoder, FORWARD.into_iter().take(3));
        assert_eq!(decoder.take_notches(), 0);
        assert_eq!(decoder.pending(), 3);

        run(&mut decoder, FORWARD.into_iter().skip(3));
        assert_eq!(decoder.take_notches(), 1);
        assert_eq!(decoder.pending(), 0);
    }

    fn press(detector: &mut ClickDetector, samples: u32) -> Vec<ClickEvent> {
        (0..samples).filter_map(|_| detector.sample(true)).collect()
    }

    fn release(detector: &mut ClickDetector, samples: u32) -> Vec<ClickEvent> {
        (0..samples).filter_map(|_| detector.sample(false)).collect()
    }

    #[test]
    fn test_single_click_without_double_click() {
        let mut detector = ClickDetector::new(100, None);
        assert!(press(&mut detector, 3).is_empty());
        assert_eq!(release(&mut detector, 1), vec![ClickEvent::Clicked]);
        assert!(release(&mut detector, 50).is_empty());
    }

    #[test]
    fn test_click_waits_out_double_click_window() {
        let mut detector = ClickDetector::new(100, Some(40));
        press(&mut detector, 3);
        assert!(release(&mut detector, 1).is_empty());
        assert!(detector.awaiting_second_click());
        assert!(release(&mut detector, 39).is_empty());
        assert_eq!(release(&mut detector, 1), vec![ClickEvent::Clicked]);
        assert!(!detector.awaiting_second_click());
    }

    #[test]
    fn test_second_click_in_window_is_double_click() {
        let mut detector = ClickDetector::new(100, Some(40));
        press(&mut detector, 3);
        release(&mut detector, 10);
        press(&mut detector, 3);
        assert_eq!(release(&mut detector, 1), vec![ClickEvent::DoubleClicked]);
        assert!(release(&mut detector, 100).is_empty());
    }

    #[test]
    fn test_hold_then_release() {
        let mut detector = ClickDetector::new(100, Some(40));
        let events = press(&mut detector, 103);
        assert_eq!(events, vec![ClickEvent::Held; 3]);
        assert_eq!(release(&mut detector, 1), vec![ClickEvent::Released]);
        assert!(release(&mut detector, 100).is_empty());
    }

    #[test]
    fn test_click_event_maps_to_button_state() {
        use platform::ButtonState;
        assert_eq!(ButtonState::from(ClickEvent::Clicked), ButtonState::Clicked);
        assert_eq!(ButtonState::from(ClickEvent::Held), ButtonState::Held);
    }
}
