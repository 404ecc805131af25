//! Bus protocol layer
//!
//! Frames command and data bytes for the panel controller over SPI with a
//! separate data/command select line, and programs the controller's
//! addressable window.
//!
//! # Framing
//!
//! ```text
//! command:  DC=0  CS↓  [cmd]            CS↑
//! data:     DC=1  CS↓  [b0 b1 ... bn]   CS↑
//! ```
//!
//! CS is held by a guard for exactly one burst and released on every exit
//! path, including an SPI error part-way through a pixel stream.
//!
//! The controller has no readback over this wiring, so a corrupted
//! transfer cannot be detected here. The only failure reported is the one
//! the SPI peripheral itself returns.

use lilguy_hal::{OutputPin, SpiBus};

use crate::color::Rgb565;
use crate::window::Window;

/// Controller command bytes (ST7796 / MIPI DCS)
pub mod cmd {
    pub const SOFTWARE_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDRESS_SET: u8 = 0x2A;
    pub const ROW_ADDRESS_SET: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const PIXEL_FORMAT: u8 = 0x3A;

    /// COLMOD parameter: 16 bits per pixel on both interfaces
    pub const PIXEL_FORMAT_RGB565: u8 = 0x55;
}

/// Pixel bytes staged per SPI write during a stream
const CHUNK_BYTES: usize = 64;

/// Bus transfer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// The SPI peripheral rejected a write
    Spi(E),
}

/// Chip-select held for the lifetime of one burst
struct ChipSelect<'a, CS: OutputPin> {
    pin: &'a mut CS,
}

impl<'a, CS: OutputPin> ChipSelect<'a, CS> {
    fn assert(pin: &'a mut CS) -> Self {
        pin.set_low();
        Self { pin }
    }
}

impl<CS: OutputPin> Drop for ChipSelect<'_, CS> {
    fn drop(&mut self) {
        self.pin.set_high();
    }
}

/// Exclusive handle on the panel's SPI bus and control lines
pub struct BusSession<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
}

impl<SPI, CS, DC> BusSession<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
{
    /// Take ownership of the bus and control lines
    ///
    /// Chip-select is driven high (deasserted) immediately.
    pub fn new(spi: SPI, mut cs: CS, dc: DC) -> Self {
        cs.set_high();
        Self { spi, cs, dc }
    }

    /// One CS-bracketed burst with DC at the given level
    fn burst(&mut self, data: bool, bytes: &[u8]) -> Result<(), BusError<SPI::Error>> {
        self.dc.set_state(data);
        let _cs = ChipSelect::assert(&mut self.cs);
        self.spi.write(bytes).map_err(BusError::Spi)
    }

    /// Send a single command byte
    pub fn write_command(&mut self, cmd: u8) -> Result<(), BusError<SPI::Error>> {
        self.burst(false, &[cmd])
    }

    /// Send a single parameter byte
    pub fn write_data(&mut self, data: u8) -> Result<(), BusError<SPI::Error>> {
        self.burst(true, &[data])
    }

    /// Send a 16-bit parameter, high byte first
    pub fn write_data16(&mut self, data: u16) -> Result<(), BusError<SPI::Error>> {
        self.burst(true, &data.to_be_bytes())
    }

    /// Program the controller's address window and open memory write
    ///
    /// After this returns the controller places each streamed pixel at its
    /// internal address counter, advancing left to right, top to bottom
    /// within `window`. The caller guarantees the window lies on the panel.
    pub fn set_window(&mut self, window: Window) -> Result<(), BusError<SPI::Error>> {
        self.write_command(cmd::COLUMN_ADDRESS_SET)?;
        self.write_data16(window.x0)?;
        self.write_data16(window.x1)?;

        self.write_command(cmd::ROW_ADDRESS_SET)?;
        self.write_data16(window.y0)?;
        self.write_data16(window.y1)?;

        self.write_command(cmd::MEMORY_WRITE)
    }

    /// Stream pixels as one continuous data burst
    pub fn write_pixels<I>(&mut self, pixels: I) -> Result<(), BusError<SPI::Error>>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        self.dc.set_high();
        let _cs = ChipSelect::assert(&mut self.cs);

        let mut chunk = [0u8; CHUNK_BYTES];
        let mut len = 0;
        for pixel in pixels {
            chunk[len..len + 2].copy_from_slice(&pixel.to_be_bytes());
            len += 2;
            if len == CHUNK_BYTES {
                self.spi.write(&chunk).map_err(BusError::Spi)?;
                len = 0;
            }
        }
        if len > 0 {
            self.spi.write(&chunk[..len]).map_err(BusError::Spi)?;
        }
        Ok(())
    }

    /// Stream `count` copies of one colour as a single burst
    pub fn write_repeated(&mut self, color: Rgb565, count: u32) -> Result<(), BusError<SPI::Error>> {
        self.write_pixels(core::iter::repeat(color).take(count as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, Event, Kind, Line, Wire};
    use proptest::prelude::*;

    #[test]
    fn test_command_framing() {
        let wire = Wire::new();
        let mut bus = mock::session(&wire);
        wire.clear();

        bus.write_command(cmd::MEMORY_WRITE).unwrap();

        assert_eq!(
            wire.events(),
            vec![
                Event::Level(Line::Dc, false),
                Event::Level(Line::Cs, false),
                Event::Byte(0x2C),
                Event::Level(Line::Cs, true),
            ]
        );
    }

    #[test]
    fn test_data_framing() {
        let wire = Wire::new();
        let mut bus = mock::session(&wire);

        bus.write_data(0x55).unwrap();

        let bursts = wire.bursts();
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].kind, Kind::Data);
        assert_eq!(bursts[0].bytes, vec![0x55]);
        assert!(wire.level(Line::Cs));
    }

    #[test]
    fn test_set_window_sequence() {
        let wire = Wire::new();
        let mut bus = mock::session(&wire);

        bus.set_window(Window::new(50, 130, 269, 349).unwrap()).unwrap();

        let ops = wire.ops();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0].cmd, cmd::COLUMN_ADDRESS_SET);
        assert_eq!(ops[0].words(), vec![50, 269]);
        assert_eq!(ops[1].cmd, cmd::ROW_ADDRESS_SET);
        assert_eq!(ops[1].words(), vec![130, 349]);
        assert_eq!(ops[2].cmd, cmd::MEMORY_WRITE);
        assert!(ops[2].data.is_empty());
    }

    #[test]
    fn test_pixel_stream_is_one_burst() {
        let wire = Wire::new();
        let mut bus = mock::session(&wire);

        // Longer than one staging chunk
        let pixels: Vec<Rgb565> = (0..100u16).map(Rgb565::new).collect();
        bus.write_pixels(pixels.iter().copied()).unwrap();

        let bursts = wire.bursts();
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].bytes.len(), 200);
        assert_eq!(&bursts[0].bytes[..4], &[0x00, 0x00, 0x00, 0x01]);
        assert_eq!(&bursts[0].bytes[198..], &[0x00, 99]);
    }

    #[test]
    fn test_repeated_fill() {
        let wire = Wire::new();
        let mut bus = mock::session(&wire);

        bus.write_repeated(Rgb565::ORANGE, 3).unwrap();

        assert_eq!(wire.bytes(), vec![0xFD, 0x20, 0xFD, 0x20, 0xFD, 0x20]);
    }

    #[test]
    fn test_cs_released_on_error() {
        let wire = Wire::new();
        let mut bus = BusSession::new(
            wire.failing_spi(10),
            wire.pin(Line::Cs),
            wire.pin(Line::Dc),
        );

        let result = bus.write_repeated(Rgb565::WHITE, 64);
        assert_eq!(result, Err(BusError::Spi(mock::MockSpiError)));
        assert!(wire.level(Line::Cs));
        assert_eq!(wire.bytes().len(), 10);
    }

    proptest! {
        #[test]
        fn prop_write_data16_is_big_endian(v in any::<u16>()) {
            let wire = Wire::new();
            let mut bus = mock::session(&wire);

            bus.write_data16(v).unwrap();

            let bursts = wire.bursts();
            prop_assert_eq!(bursts.len(), 1);
            prop_assert_eq!(bursts[0].kind, Kind::Data);
            prop_assert_eq!(bursts[0].bytes.clone(), vec![(v >> 8) as u8, (v & 0xFF) as u8]);
        }
    }
}
