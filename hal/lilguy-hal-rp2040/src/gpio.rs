//! GPIO wrappers
//!
//! Newtypes over the embassy pin drivers so they can implement the
//! `lilguy-hal` pin traits.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;

/// Push-pull output
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Configure `pin` as an output starting at `initial`
    pub fn new(pin: Peri<'d, AnyPin>, initial: Level) -> Self {
        Self {
            pin: Output::new(pin, initial),
        }
    }

    /// Flip the current level
    pub fn toggle(&mut self) {
        self.pin.toggle();
    }
}

impl lilguy_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Digital input
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    pub fn new(pin: Peri<'d, AnyPin>, pull: Pull) -> Self {
        Self {
            pin: Input::new(pin, pull),
        }
    }

    /// Input with the internal pull-up, for buttons wired to ground
    pub fn pulled_up(pin: Peri<'d, AnyPin>) -> Self {
        Self::new(pin, Pull::Up)
    }
}

impl lilguy_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
