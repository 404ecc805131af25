//! Blocking SPI master
//!
//! The panel link is transmit only, so the bus is created without a MISO
//! pin and without DMA: every write returns once the last byte has left
//! the FIFO.

use embassy_rp::spi::{self, Blocking, ClkPin, Instance, MosiPin, Spi};
use embassy_rp::Peri;
use lilguy_hal::spi::{Phase, Polarity};
use lilguy_hal::SpiConfig;

/// Transmit-only SPI bus
pub struct RpSpi<'d, T: Instance> {
    inner: Spi<'d, T, Blocking>,
}

impl<'d, T: Instance> RpSpi<'d, T> {
    pub fn new(
        peripheral: Peri<'d, T>,
        clk: Peri<'d, impl ClkPin<T> + 'd>,
        mosi: Peri<'d, impl MosiPin<T> + 'd>,
        config: &SpiConfig,
    ) -> Self {
        Self {
            inner: Spi::new_blocking_txonly(peripheral, clk, mosi, to_embassy(config)),
        }
    }
}

impl<T: Instance> lilguy_hal::SpiBus for RpSpi<'_, T> {
    type Error = spi::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_write(data)
    }
}

/// Convert a HAL SPI configuration to the embassy one
pub fn to_embassy(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = config.frequency;
    out.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    out.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    out
}
