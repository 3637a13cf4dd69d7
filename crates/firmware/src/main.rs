//! Volume Knob Firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32H743ZI.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Pin, Speed};
use embassy_stm32::spi::{Config as SpiConfig, Spi};
use embassy_stm32::time::Hertz;
use embassy_time::{Duration, Ticker, Timer};

use interaction::{Controller, InteractionConfig};
use platform::config::{APP_VERSION, PIXEL_COUNT};
use platform::EmbassyClock;

use firmware::boot::{BOOT_SEQUENCE_STEPS, CONTROL_TICK_MS, WATCHDOG_TIMEOUT_MS, WATCHDOG_TIMEOUT_US};
use firmware::drivers::ws2812::SPI_FREQUENCY_HZ;
use firmware::drivers::{GpioHaptic, Ws2812};
use firmware::input::builder::InputBuilder;
use firmware::input::hardware::{knob_input, spawn_encoder_task, EncoderPins};
use firmware::usb;

// Panic handler
use panic_probe as _;

/// Park without petting the watchdog; the IWDG resets the MCU.
async fn halt() -> ! {
    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("Volume Knob firmware v{=str}", APP_VERSION);
    for step in BOOT_SEQUENCE_STEPS {
        defmt::debug!("boot: {=str}", step);
    }

    let p = embassy_stm32::init(firmware::boot::build_embassy_config());

    // Once unleashed the IWDG cannot be stopped; the control loop pets it
    // every tick.
    let mut watchdog = embassy_stm32::wdg::IndependentWatchdog::new(p.IWDG1, WATCHDOG_TIMEOUT_US);
    watchdog.unleash();
    defmt::info!("IWDG watchdog armed: timeout={=u32}ms", WATCHDOG_TIMEOUT_MS);

    // -----------------------------------------------------------------------
    // Outputs
    //
    //   PA7 = SPI1 MOSI → WS2812 DIN (PA5 SCK and PA6 MISO unconnected)
    //   PB0 = vibration motor driver, active high
    // -----------------------------------------------------------------------
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = Hertz(SPI_FREQUENCY_HZ);
    let spi = Spi::new(
        p.SPI1, p.PA5,      // SCK
        p.PA7,      // MOSI
        p.PA6,      // MISO (not used but required by HAL)
        p.DMA1_CH0, // TX DMA
        p.DMA1_CH1, // RX DMA
        spi_config,
    );
    let light: Ws2812<_, PIXEL_COUNT> = Ws2812::new(spi);
    let haptic = match GpioHaptic::new(Output::new(p.PB0, Level::Low, Speed::Low)) {
        Ok(haptic) => haptic,
        Err(never) => match never {},
    };

    // The controller only needs the static input cells and the command
    // queue, so the outputs are blanked before any task starts.
    let mut knob = match Controller::new(
        InteractionConfig::new(),
        knob_input(),
        EmbassyClock,
        light,
        haptic,
        usb::command_sink(),
    ) {
        Ok(knob) => knob,
        Err(e) => {
            defmt::error!("interaction config rejected: {}", e);
            halt().await
        }
    };

    if let Err(e) = knob.blank_outputs() {
        defmt::warn!("blanking outputs failed: {=str}", e.channel());
    }

    // -----------------------------------------------------------------------
    // Tasks
    //
    //   PA8  = Encoder A, PA3 = Encoder B, PA0 = push button (all active-low)
    //   PA11/PA12 = USB OTG FS
    // -----------------------------------------------------------------------
    let encoder_config = InputBuilder::encoder().build();
    let pins = EncoderPins::new(p.PA8.degrade(), p.PA3.degrade(), p.PA0.degrade());
    if let Err(e) = spawn_encoder_task(&spawner, pins, encoder_config) {
        defmt::error!("encoder task spawn failed: {}", e);
        halt().await;
    }

    let usb_started = usb::init_driver(p.USB_OTG_FS, p.PA12, p.PA11)
        .and_then(|driver| usb::spawn_usb_tasks(&spawner, driver));
    if let Err(e) = usb_started {
        defmt::error!("USB bring-up failed: {}", e);
        halt().await;
    }

    defmt::info!("Entering control loop");
    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_TICK_MS));
    loop {
        match knob.tick() {
            Ok(report) => {
                if let Some(event) = report.step.event {
                    defmt::debug!(
                        "{=str}: level {=i8}, phase {=str}",
                        event.kind.as_str(),
                        report.level.get(),
                        report.phase.as_str()
                    );
                }
            }
            Err(e) => defmt::warn!("tick: {=str} write failed", e.channel()),
        }
        watchdog.pet();
        ticker.next().await;
    }
}
