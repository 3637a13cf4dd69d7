//! Lock-free cells shared between the encoder service and the main loop.
//!
//! The encoder is serviced from a fixed-cadence timer context that runs
//! asynchronously to the main loop. These two cells are the only state that
//! crosses that boundary:
//!
//! ```text
//! encoder service (1 kHz) ──add()──►  RotationCounter ──take()──► main loop
//!                         ──latch()─► ButtonLatch     ──take()──►
//! ```
//!
//! Both cells are single-word atomics, so the producer never waits on the
//! consumer and no critical section is needed on Cortex-M3 and above.
//! `take()` is a read-and-clear swap: a step added concurrently with a take
//! lands either in this read or the next one, never in both and never in
//! neither.

use core::sync::atomic::{AtomicI32, AtomicU8, Ordering};

use crate::input::{ButtonState, RotaryInput};

/// Accumulated encoder steps not yet consumed by the main loop.
#[derive(Debug)]
pub struct RotationCounter {
    steps: AtomicI32,
}

impl RotationCounter {
    /// Create an empty counter; usable in a `static`.
    pub const fn new() -> Self {
        Self {
            steps: AtomicI32::new(0),
        }
    }

    /// Add decoded steps (producer side).
    ///
    /// Wraps on overflow; the consumer drains the counter every millisecond,
    /// far below the 2^31 steps needed to wrap.
    pub fn add(&self, delta: i32) {
        if delta != 0 {
            self.steps.fetch_add(delta, Ordering::Release);
        }
    }

    /// Read and clear the pending steps (consumer side).
    pub fn take(&self) -> i32 {
        self.steps.swap(0, Ordering::AcqRel)
    }

    /// Pending steps without clearing them.
    pub fn peek(&self) -> i32 {
        self.steps.load(Ordering::Acquire)
    }
}

impl Default for RotationCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Last non-idle button state reported by the debouncer.
#[derive(Debug)]
pub struct ButtonLatch {
    state: AtomicU8,
}

impl ButtonLatch {
    /// Create a latch holding [`ButtonState::Idle`]; usable in a `static`.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(ButtonState::Idle as u8),
        }
    }

    /// Record a debounced state (producer side).
    ///
    /// `Idle` is ignored so that a pending click survives until the main loop
    /// has seen it; any other state replaces what was latched.
    pub fn latch(&self, state: ButtonState) {
        if state != ButtonState::Idle {
            self.state.store(u8::from(state), Ordering::Release);
        }
    }

    /// Read the latched state and reset to `Idle` (consumer side).
    pub fn take(&self) -> ButtonState {
        ButtonState::from_u8(self.state.swap(ButtonState::Idle as u8, Ordering::AcqRel))
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// [`RotaryInput`] backed by a [`RotationCounter`] and a [`ButtonLatch`].
///
/// Typically built from two `static` cells that the encoder task also holds.
#[derive(Debug, Clone, Copy)]
pub struct SharedInput<'a> {
    counter: &'a RotationCounter,
    button: &'a ButtonLatch,
}

impl<'a> SharedInput<'a> {
    /// Bind the consumer side of both cells.
    pub const fn new(counter: &'a RotationCounter, button: &'a ButtonLatch) -> Self {
        Self { counter, button }
    }
}

impl RotaryInput for SharedInput<'_> {
    fn read_net_rotation(&mut self) -> i32 {
        self.counter.take()
    }

    fn read_button(&mut self) -> ButtonState {
        self.button.take()
    }
}
