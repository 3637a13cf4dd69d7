//! Host command channel: media keys sent to the connected computer.
//!
//! Commands travel as USB HID Consumer Control reports (usage page `0x0C`).
//! A report carries one 16-bit usage ID, little-endian; a press report is
//! followed by an all-zero release report so the host sees one key stroke.

/// Media-control command sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Volume Increment
    VolumeUp,
    /// Volume Decrement
    VolumeDown,
    /// Mute toggle
    Mute,
}

impl HostCommand {
    /// HID Consumer Page usage ID (HID Usage Tables §15).
    pub const fn usage_id(self) -> u16 {
        match self {
            Self::VolumeUp => 0x00E9,
            Self::VolumeDown => 0x00EA,
            Self::Mute => 0x00E2,
        }
    }

    /// Short human-readable name, for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VolumeUp => "volume-up",
            Self::VolumeDown => "volume-down",
            Self::Mute => "mute",
        }
    }
}

/// Sink for host commands.
///
/// Implementations must not block the caller: the main loop runs every
/// millisecond and a slow host must not stall it.
pub trait HostCommandSink {
    /// Error type for command writes
    type Error: core::fmt::Debug;

    /// Send one command to the host.
    fn emit_command(&mut self, command: HostCommand) -> Result<(), Self::Error>;
}

/// Two-byte HID Consumer Control input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport([u8; 2]);

impl ConsumerReport {
    /// Report length in bytes.
    pub const LEN: usize = 2;

    /// "No key pressed" report.
    pub const RELEASE: Self = Self([0, 0]);

    /// Report pressing the key for `command`.
    pub const fn press(command: HostCommand) -> Self {
        Self(command.usage_id().to_le_bytes())
    }

    /// Raw report bytes.
    pub const fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

/// HID report descriptor for a Consumer Control collection with a single
/// 16-bit usage array (usages 0..=0x3FF).
pub const CONSUMER_CONTROL_DESCRIPTOR: &[u8] = &[
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x03, //   Logical Maximum (1023)
    0x19, 0x00, //   Usage Minimum (0)
    0x2A, 0xFF, 0x03, //   Usage Maximum (1023)
    0x75, 0x10, //   Report Size (16)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x00, //   Input (Data, Array, Absolute)
    0xC0, // End Collection
];

/// Returned by queue-backed sinks when the host side has fallen behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandQueueFull(pub HostCommand);

#[cfg(feature = "std")]
impl std::error::Error for CommandQueueFull {}

impl core::fmt::Display for CommandQueueFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "host command queue full, dropped {}", self.0.as_str())
    }
}
