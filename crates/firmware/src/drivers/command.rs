//! Host command sink backed by an embassy channel.
//!
//! The main loop must never wait on USB, so commands are handed to the USB
//! HID task through a bounded channel with [`try_send`]. If the host stops
//! polling and the queue fills up, further commands are dropped and reported
//! as [`CommandQueueFull`].
//!
//! [`try_send`]: embassy_sync::channel::Sender::try_send

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;
use platform::{CommandQueueFull, HostCommand, HostCommandSink};

/// Depth of the command queue between the main loop and the USB task.
///
/// A knob turned as fast as a hand can manage produces well under one command
/// per USB poll interval; eight covers a host that skips a few polls.
pub const COMMAND_QUEUE_DEPTH: usize = 8;

/// [`HostCommandSink`] that enqueues without blocking.
pub struct QueuedCommandSink<'a, M: RawMutex, const N: usize> {
    tx: Sender<'a, M, HostCommand, N>,
    dropped: u32,
}

impl<'a, M: RawMutex, const N: usize> QueuedCommandSink<'a, M, N> {
    /// Wrap the producer side of a command channel.
    pub fn new(tx: Sender<'a, M, HostCommand, N>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Commands lost to a full queue since start-up.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<M: RawMutex, const N: usize> HostCommandSink for QueuedCommandSink<'_, M, N> {
    type Error = CommandQueueFull;

    fn emit_command(&mut self, command: HostCommand) -> Result<(), Self::Error> {
        self.tx.try_send(command).map_err(|_| {
            self.dropped = self.dropped.saturating_add(1);
            CommandQueueFull(command)
        })
    }
}
