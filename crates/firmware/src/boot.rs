//! Hardware boot sequence for the volume knob.
//!
//! Initialization order (MUST be respected, order matters for correctness):
//!   1. Configure RCC: PLL1 system clock, HSI48 + CRS for USB OTG FS
//!   2. Arm the independent watchdog
//!   3. Configure outputs and blank them (strip dark, motor off)
//!   4. Start the encoder and USB tasks
//!   5. Enter the 1 ms control loop
//!
//! Everything here except [`build_embassy_config`] is plain data so the
//! ordering and timing constants are testable on the host.

/// Ordered list of boot steps, logged at start-up.
///
/// # Correctness Invariants
///
/// - HSI48 must be enabled before `embassy_stm32::init()`; the OTG FS core
///   has no other 48 MHz source on this board.
/// - Outputs are blanked before any task can produce input, so a reset never
///   leaves the ring lit or the motor running.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. RCC: PLL1 400 MHz sys, HSI48 + CRS for USB",
    "2. IWDG: arm watchdog",
    "3. Outputs: WS2812 ring dark, haptic motor off",
    "4. Tasks: encoder service 1 kHz, USB device + HID writer",
    "5. Control loop: tick every 1 ms",
];

/// Control loop period.
pub const CONTROL_TICK_MS: u64 = 1;

/// Independent watchdog timeout in milliseconds.
///
/// The control loop pets the watchdog every tick, so this only has to cover
/// the longest stall the loop can legitimately see (a USB enumeration burst).
pub const WATCHDOG_TIMEOUT_MS: u32 = 500;

/// [`WATCHDOG_TIMEOUT_MS`] in the unit `IndependentWatchdog::new` expects.
pub const WATCHDOG_TIMEOUT_US: u32 = WATCHDOG_TIMEOUT_MS.saturating_mul(1_000);

/// SPI1 kernel clock (PLL1_Q).
pub const SPI1_KERNEL_CLOCK_HZ: u32 = 200_000_000;

/// SCK the HAL actually produces for the WS2812 request: the fastest
/// power-of-two division (/2 ... /256) of the kernel clock not above
/// `SPI_FREQUENCY_HZ`. 200 MHz / 64 = 3.125 MHz, 320 ns per SPI bit.
pub const SPI1_CLOCK_HZ: u32 =
    spi_clock_hz(SPI1_KERNEL_CLOCK_HZ, crate::drivers::ws2812::SPI_FREQUENCY_HZ);

/// Fastest `kernel_hz >> n` (n in 1..=8) not above `requested_hz`; the
/// slowest divider when none fits.
pub const fn spi_clock_hz(kernel_hz: u32, requested_hz: u32) -> u32 {
    let mut shift: u32 = 1;
    let mut hz = kernel_hz;
    while shift <= 8 {
        hz = match kernel_hz.checked_shr(shift) {
            Some(hz) => hz,
            None => 0,
        };
        if hz <= requested_hz {
            return hz;
        }
        shift = shift.saturating_add(1);
    }
    hz
}

/// Build the `embassy_stm32::Config` with the RCC settings this board needs.
///
/// # Clock Tree (HSI → 400 MHz core)
///
/// HSI (64 MHz) → PLL1 (prediv=4, mul=50) → PLL1_P = 400 MHz (sys)
/// PLL1_Q: DIV4 → 200 MHz  (SPI1 kernel clock, see [`SPI1_CLOCK_HZ`])
/// AHB prescaler: DIV2 → 200 MHz
/// APB1/2/3/4:    DIV2 → 100 MHz
/// HSI48, trimmed by CRS from USB SOF packets → OTG FS
///
/// # DO NOT call `embassy_stm32::init(Default::default())`
///
/// The default leaves HSI48 off and USB never enumerates.
#[cfg(feature = "hardware")]
pub fn build_embassy_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::*;

    let mut config = embassy_stm32::Config::default();

    config.rcc.hsi = Some(HSIPrescaler::DIV1);
    config.rcc.csi = true;
    config.rcc.hsi48 = Some(Hsi48Config {
        sync_from_usb: true,
    });

    config.rcc.pll1 = Some(Pll {
        source: PllSource::HSI,
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL50,
        divp: Some(PllDiv::DIV2), // 400 MHz, system clock
        divq: Some(PllDiv::DIV4), // 200 MHz, SPI1 kernel clock
        divr: None,
    });

    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV2;
    config.rcc.apb1_pre = APBPrescaler::DIV2;
    config.rcc.apb2_pre = APBPrescaler::DIV2;
    config.rcc.apb3_pre = APBPrescaler::DIV2;
    config.rcc.apb4_pre = APBPrescaler::DIV2;
    config.rcc.voltage_scale = VoltageScale::Scale1;

    config
}
