//! WS2812 addressable LED strip over SPI.
//!
//! The strip's one-wire protocol is synthesised on the SPI MOSI line, four
//! SPI bits per WS2812 data bit. The request is 3.2 MHz; the H743 divides its
//! 200 MHz SPI kernel clock by powers of two only, so the bus actually runs
//! at 3.125 MHz ([`SPI1_CLOCK_HZ`]), 320 ns per SPI bit.
//!
//! [`SPI1_CLOCK_HZ`]: crate::boot::SPI1_CLOCK_HZ
//!
//! ```text
//!   WS2812 '0' → 1000  (high 320 ns, low 960 ns)
//!   WS2812 '1' → 1100  (high 640 ns, low 640 ns)
//! ```
//!
//! One colour byte therefore takes four SPI bytes and one pixel (G, R, B)
//! takes twelve. After the pixel data the line is held low for
//! [`RESET_BYTES`] bytes (307 µs, above the 280 µs newer WS2812B parts
//! need) so the strip latches the frame.
//!
//! Only MOSI is wired; SCK is left unconnected.

use embedded_hal::spi::SpiBus;
use platform::{LightStrip, Rgb};

/// SPI clock requested from the HAL; it rounds down to [`SPI1_CLOCK_HZ`].
///
/// [`SPI1_CLOCK_HZ`]: crate::boot::SPI1_CLOCK_HZ
pub const SPI_FREQUENCY_HZ: u32 = 3_200_000;

/// SPI bytes per pixel: 3 colour bytes × 4 SPI bytes.
pub const BYTES_PER_PIXEL: usize = 12;

/// Low bytes after a frame; 120 × 2.56 µs = 307 µs.
pub const RESET_BYTES: usize = 120;

/// Bit masks of the two WS2812 bits carried by each SPI byte, MSB first.
const BIT_PAIRS: [(u8, u8); 4] = [(0x80, 0x40), (0x20, 0x10), (0x08, 0x04), (0x02, 0x01)];

/// SPI byte for two consecutive WS2812 bits.
const fn bit_pair(hi: bool, lo: bool) -> u8 {
    match (hi, lo) {
        (false, false) => 0b1000_1000,
        (false, true) => 0b1000_1100,
        (true, false) => 0b1100_1000,
        (true, true) => 0b1100_1100,
    }
}

/// Encode one colour byte (MSB first) into four SPI bytes.
pub fn encode_byte(value: u8) -> [u8; 4] {
    let mut out = [0u8; 4];
    for (slot, (hi, lo)) in out.iter_mut().zip(BIT_PAIRS) {
        *slot = bit_pair(value & hi != 0, value & lo != 0);
    }
    out
}

/// Encode one pixel in the strip's GRB wire order.
pub fn encode_pixel(color: Rgb) -> [u8; BYTES_PER_PIXEL] {
    let mut out = [0u8; BYTES_PER_PIXEL];
    for (chunk, channel) in out.chunks_exact_mut(4).zip([color.g, color.r, color.b]) {
        chunk.copy_from_slice(&encode_byte(channel));
    }
    out
}

/// Strip of `N` WS2812 pixels, all showing the same colour.
pub struct Ws2812<SPI, const N: usize> {
    spi: SPI,
    frame: [[u8; BYTES_PER_PIXEL]; N],
}

impl<SPI: SpiBus, const N: usize> Ws2812<SPI, N> {
    /// Wrap an SPI bus already configured for [`SPI_FREQUENCY_HZ`], mode 0.
    ///
    /// Nothing is sent until the first [`set_light`](LightStrip::set_light).
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            frame: [encode_pixel(Rgb::BLACK); N],
        }
    }

    /// Number of pixels.
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` for a zero-length strip.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Encoded frame as sent on the wire, without the reset gap.
    pub fn frame_bytes(&self) -> &[u8] {
        self.frame.as_flattened()
    }

    /// Give the bus back.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus, const N: usize> LightStrip for Ws2812<SPI, N> {
    type Error = SPI::Error;

    fn set_light(&mut self, color: Rgb, brightness: u8) -> Result<(), Self::Error> {
        let pixel = encode_pixel(color.scaled(brightness));
        self.frame.fill(pixel);

        self.spi.write(self.frame.as_flattened())?;
        self.spi.write(&[0u8; RESET_BYTES])?;
        self.spi.flush()
    }
}
