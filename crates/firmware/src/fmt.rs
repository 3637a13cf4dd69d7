//! Logging macros shared by the drivers, the encoder service and the emulator.
//!
//! `hardware` pulls in `defmt`, `emulator` pulls in `tracing`. Keep format
//! strings to plain `{}` placeholders so both expand.

#![allow(unused_macros)]

#[cfg(all(feature = "defmt", feature = "tracing"))]
compile_error!("features `defmt` and `tracing` are mutually exclusive");

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(feature = "tracing")]
            ::tracing::debug!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "tracing")))]
            {
                $( let _ = &$x; )*
            }
        }
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::info!($s $(, $x)*);
            #[cfg(feature = "tracing")]
            ::tracing::info!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "tracing")))]
            {
                $( let _ = &$x; )*
            }
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "defmt")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(feature = "tracing")]
            ::tracing::warn!($s $(, $x)*);
            #[cfg(not(any(feature = "defmt", feature = "tracing")))]
            {
                $( let _ = &$x; )*
            }
        }
    };
}
