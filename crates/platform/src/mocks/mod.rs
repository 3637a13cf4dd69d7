//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]
// Mock counters; overflow not a concern in tests.
#![allow(clippy::arithmetic_side_effects)]

use core::cell::Cell;

use crate::*;

/// Capacity of every mock's write log.
pub const LOG_CAPACITY: usize = 64;

/// Error returned by a mock after [`fail_next`](MockLight::fail_next) was armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Mock rotary encoder: one scripted `(rotation, button)` pair per read cycle.
///
/// `read_net_rotation` pops the next pair and latches its button state for a
/// later `read_button`, the way [`ButtonLatch`] does: a non-idle state stays
/// pending until it is read. An empty script reads as no movement.
pub struct MockInput {
    script: heapless::Deque<(i32, ButtonState), 32>,
    pending_button: ButtonState,
}

impl MockInput {
    /// Create new mock input
    pub fn new() -> Self {
        Self {
            script: heapless::Deque::new(),
            pending_button: ButtonState::Idle,
        }
    }

    /// Queue a rotation for one tick
    pub fn push_rotation(&mut self, delta: i32) -> Result<(), (i32, ButtonState)> {
        self.script.push_back((delta, ButtonState::Idle))
    }

    /// Queue a button state for one tick
    pub fn push_button(&mut self, state: ButtonState) -> Result<(), (i32, ButtonState)> {
        self.script.push_back((0, state))
    }

    /// Queue rotation and button state together for one tick
    pub fn push(&mut self, delta: i32, state: ButtonState) -> Result<(), (i32, ButtonState)> {
        self.script.push_back((delta, state))
    }

    /// Number of scripted ticks left
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl RotaryInput for MockInput {
    fn read_net_rotation(&mut self) -> i32 {
        let (delta, button) = self.script.pop_front().unwrap_or((0, ButtonState::Idle));
        if button != ButtonState::Idle {
            self.pending_button = button;
        }
        delta
    }

    fn read_button(&mut self) -> ButtonState {
        core::mem::take(&mut self.pending_button)
    }
}

/// Manually advanced clock
#[derive(Debug, Default)]
pub struct MockClock {
    now_ms: Cell<u64>,
}

impl MockClock {
    /// Create a clock at `t = 0`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at `t = ms`
    pub fn at_millis(ms: u64) -> Self {
        Self {
            now_ms: Cell::new(ms),
        }
    }

    /// Move time forward
    pub fn advance_millis(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    /// Jump to an absolute time
    pub fn set_millis(&self, ms: u64) {
        self.now_ms.set(ms);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        Instant::from_millis(self.now_ms.get())
    }
}

/// Mock light strip, records every frame
#[derive(Debug, Default)]
pub struct MockLight {
    frames: heapless::Vec<(Rgb, u8), LOG_CAPACITY>,
    fail_next: bool,
}

impl MockLight {
    /// Create new mock light strip
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames written so far, oldest first
    pub fn frames(&self) -> &[(Rgb, u8)] {
        &self.frames
    }

    /// Most recent frame
    pub fn last(&self) -> Option<(Rgb, u8)> {
        self.frames.last().copied()
    }

    /// Make the next write fail
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl LightStrip for MockLight {
    type Error = MockError;

    fn set_light(&mut self, color: Rgb, brightness: u8) -> Result<(), Self::Error> {
        if core::mem::take(&mut self.fail_next) {
            return Err(MockError);
        }
        // Store frames for verification
        if self.frames.len() < self.frames.capacity() {
            let _ = self.frames.push((color, brightness));
        }
        Ok(())
    }
}

/// Mock haptic actuator
#[derive(Debug, Default)]
pub struct MockHaptic {
    on: bool,
    on_count: usize,
    off_count: usize,
    fail_next: bool,
}

impl MockHaptic {
    /// Create new mock actuator, starts off
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the motor is running
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Number of `set_haptic(true)` calls
    pub fn on_count(&self) -> usize {
        self.on_count
    }

    /// Number of `set_haptic(false)` calls
    pub fn off_count(&self) -> usize {
        self.off_count
    }

    /// Make the next write fail
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl HapticActuator for MockHaptic {
    type Error = MockError;

    fn set_haptic(&mut self, on: bool) -> Result<(), Self::Error> {
        if core::mem::take(&mut self.fail_next) {
            return Err(MockError);
        }
        self.on = on;
        if on {
            self.on_count += 1;
        } else {
            self.off_count += 1;
        }
        Ok(())
    }
}

/// Mock host, records every command
#[derive(Debug, Default)]
pub struct MockHost {
    commands: heapless::Vec<HostCommand, LOG_CAPACITY>,
    fail_next: bool,
}

impl MockHost {
    /// Create new mock host
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands received so far, oldest first
    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Make the next write fail
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }
}

impl HostCommandSink for MockHost {
    type Error = MockError;

    fn emit_command(&mut self, command: HostCommand) -> Result<(), Self::Error> {
        if core::mem::take(&mut self.fail_next) {
            return Err(MockError);
        }
        if self.commands.len() < self.commands.capacity() {
            let _ = self.commands.push(command);
        }
        Ok(())
    }
}
