//! Cortex-M exception handlers for the volume knob firmware.
//!
//! - **HardFault**: raised for bus faults, illegal instructions, and stack
//!   overflow into the bottom of DTCM (the stack sits at the top of RAM, see
//!   `memory.x`).
//!
//! # Hardware-only handler
//!
//! The `#[cortex_m_rt::exception]` attribute requires ARM target intrinsics and
//! is therefore gated behind `#[cfg(feature = "hardware")]`. The module itself
//! (and `HARDFAULT_DEFINED`) compiles unconditionally so host tests can verify
//! the module exists without needing an ARM toolchain.

#![allow(clippy::doc_markdown)] // Exception handler docs use hardware terminology (HardFault, SVC) as plain text
/// `true` once this module is compiled into the crate; checked by the
/// architecture tests.
pub const HARDFAULT_DEFINED: bool = true;

/// HardFault exception handler (hardware target only).
///
/// Logs the stacked exception frame address over RTT and halts. The halt
/// stops the watchdog from being petted, so without a debugger attached the
/// IWDG resets the knob: the ring goes dark and the motor stops with the
/// reset pin states.
///
/// # Safety
///
/// This function must never return; returning from a HardFault handler is
/// undefined behavior on Cortex-M. The `-> !` return type enforces this.
#[cfg(feature = "hardware")]
#[cortex_m_rt::exception]
#[allow(unsafe_code)]
unsafe fn HardFault(ef: &cortex_m_rt::ExceptionFrame) -> ! {
    defmt::panic!(
        "HardFault! Stacked exception frame at 0x{:08X}. \
         Check stacked PC for fault address.",
        ef as *const _ as u32
    );
}
