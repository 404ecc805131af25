//! Analog joystick on the 12-bit ADC
//!
//! The stick's X and Y wipers sit on ADC0 (GPIO26) and ADC1 (GPIO27).
//! GPIO29 is the VSYS divider on Pico boards and the radio clock on the
//! Pico 2 W, so only those two inputs are usable.

use embassy_rp::adc::{self, Adc, AdcPin, Blocking, Channel};
use embassy_rp::gpio::Pull;
use embassy_rp::Peri;

/// Two-axis analog stick on a pair of ADC inputs
pub struct AnalogStick<'d> {
    adc: Adc<'d, Blocking>,
    x: Channel<'d>,
    y: Channel<'d>,
}

impl<'d> AnalogStick<'d> {
    pub fn new(
        adc: Peri<'d, embassy_rp::peripherals::ADC>,
        x: Peri<'d, impl AdcPin + 'd>,
        y: Peri<'d, impl AdcPin + 'd>,
    ) -> Self {
        Self {
            adc: Adc::new_blocking(adc, adc::Config::default()),
            x: Channel::new_pin(x, Pull::None),
            y: Channel::new_pin(y, Pull::None),
        }
    }

    /// Raw `(x, y)` conversion results
    pub fn read(&mut self) -> Result<(u16, u16), adc::Error> {
        let x = self.adc.blocking_read(&mut self.x)?;
        let y = self.adc.blocking_read(&mut self.y)?;
        Ok((x, y))
    }
}
