//! USB HID consumer-control device (hardware target only).
//!
//! The control loop enqueues [`HostCommand`]s through
//! [`QueuedCommandSink`]; [`hid_task`] drains the queue and sends each one as
//! a press report followed by a release report, so the host sees exactly one
//! key stroke per command.
//!
//! | Signal  | MCU pin |
//! |---------|---------|
//! | USB D-  | PA11    |
//! | USB D+  | PA12    |

use embassy_executor::{SpawnError, Spawner};
use embassy_stm32::peripherals::{PA11, PA12, USB_OTG_FS};
use embassy_stm32::usb_otg::{self, Driver};
use embassy_stm32::bind_interrupts;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_usb::class::hid::{self, HidWriter};
use embassy_usb::{Builder, UsbDevice};
use static_cell::StaticCell;

use platform::command::CONSUMER_CONTROL_DESCRIPTOR;
use platform::config::APP_NAME;
use platform::{ConsumerReport, HostCommand};

use crate::drivers::command::{QueuedCommandSink, COMMAND_QUEUE_DEPTH};

/// OTG FS driver type on this board.
pub type UsbDriver = Driver<'static, USB_OTG_FS>;

/// Command sink type handed to the controller.
pub type UsbCommandSink = QueuedCommandSink<'static, CriticalSectionRawMutex, COMMAND_QUEUE_DEPTH>;

/// Commands waiting for the HID endpoint.
pub static COMMANDS: Channel<CriticalSectionRawMutex, HostCommand, COMMAND_QUEUE_DEPTH> =
    Channel::new();

/// Vendor ID (pid.codes test VID).
pub const USB_VID: u16 = 0x1209;
/// Product ID.
pub const USB_PID: u16 = 0x0001;
/// Host poll interval for the HID IN endpoint.
pub const HID_POLL_MS: u8 = 10;

/// Producer side of [`COMMANDS`].
pub fn command_sink() -> UsbCommandSink {
    QueuedCommandSink::new(COMMANDS.sender())
}

/// Failure while bringing up the USB device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum UsbInitError {
    /// [`init_driver`] or [`spawn_usb_tasks`] was called twice
    AlreadyInitialized,
    /// The executor has no room for the task
    Spawn,
}

impl From<SpawnError> for UsbInitError {
    fn from(_: SpawnError) -> Self {
        Self::Spawn
    }
}

bind_interrupts!(struct Irqs {
    OTG_FS => usb_otg::InterruptHandler<USB_OTG_FS>;
});

static EP_OUT_BUFFER: StaticCell<[u8; 256]> = StaticCell::new();

/// Create the OTG FS driver with VBUS sensing off (bus-powered device).
pub fn init_driver(otg: USB_OTG_FS, dp: PA12, dm: PA11) -> Result<UsbDriver, UsbInitError> {
    let ep_out_buffer = EP_OUT_BUFFER
        .try_init([0; 256])
        .ok_or(UsbInitError::AlreadyInitialized)?;
    let mut config = usb_otg::Config::default();
    config.vbus_detection = false;
    Ok(Driver::new_fs(otg, Irqs, dp, dm, ep_out_buffer, config))
}

struct UsbBuffers {
    config_descriptor: [u8; 256],
    bos_descriptor: [u8; 256],
    msos_descriptor: [u8; 256],
    control: [u8; 64],
    hid_state: hid::State<'static>,
}

static BUFFERS: StaticCell<UsbBuffers> = StaticCell::new();

fn usb_config() -> embassy_usb::Config<'static> {
    let mut config = embassy_usb::Config::new(USB_VID, USB_PID);
    config.manufacturer = Some("Volume Knob");
    config.product = Some(APP_NAME);
    config.serial_number = Some("0001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;
    config
}

/// Build the HID device and spawn the device and writer tasks.
pub fn spawn_usb_tasks(spawner: &Spawner, driver: UsbDriver) -> Result<(), UsbInitError> {
    let buffers = BUFFERS
        .try_init(UsbBuffers {
            config_descriptor: [0; 256],
            bos_descriptor: [0; 256],
            msos_descriptor: [0; 256],
            control: [0; 64],
            hid_state: hid::State::new(),
        })
        .ok_or(UsbInitError::AlreadyInitialized)?;

    let mut builder = Builder::new(
        driver,
        usb_config(),
        &mut buffers.config_descriptor,
        &mut buffers.bos_descriptor,
        &mut buffers.msos_descriptor,
        &mut buffers.control,
    );

    let hid_config = hid::Config {
        report_descriptor: CONSUMER_CONTROL_DESCRIPTOR,
        request_handler: None,
        poll_ms: HID_POLL_MS,
        max_packet_size: 8,
    };
    let writer = HidWriter::<_, { ConsumerReport::LEN }>::new(
        &mut builder,
        &mut buffers.hid_state,
        hid_config,
    );
    let device = builder.build();

    spawner.spawn(usb_device_task(device))?;
    spawner.spawn(hid_task(writer))?;
    defmt::info!("USB HID consumer control ready ({=u16:04x}:{=u16:04x})", USB_VID, USB_PID);
    Ok(())
}

#[embassy_executor::task]
async fn usb_device_task(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    device.run().await
}

#[embassy_executor::task]
async fn hid_task(mut writer: HidWriter<'static, UsbDriver, { ConsumerReport::LEN }>) -> ! {
    let rx = COMMANDS.receiver();
    loop {
        let command = rx.receive().await;
        writer.ready().await;

        let press = ConsumerReport::press(command);
        if let Err(e) = writer.write(press.as_bytes()).await {
            defmt::warn!("HID press {} failed: {}", command, e);
            continue;
        }
        if let Err(e) = writer.write(ConsumerReport::RELEASE.as_bytes()).await {
            defmt::warn!("HID release after {} failed: {}", command, e);
        }
    }
}
