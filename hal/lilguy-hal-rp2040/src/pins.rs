//! Pin allocation by GPIO number
//!
//! Board wiring comes from `board.toml` as plain GPIO numbers. Embassy hands
//! pins out as distinct types, so the firmware moves the general-purpose
//! ones into a [`PinBank`] once and then takes them by number.
//!
//! Pins with a dedicated peripheral function (SPI clock/data, ADC inputs)
//! stay typed and never enter the bank.

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;

/// User GPIOs on the RP2040 and RP2350A
pub const GPIO_COUNT: usize = 30;

/// Wired to the CYW43 radio on the Pico W and Pico 2 W
pub const RADIO_PINS: [u8; 4] = [23, 24, 25, 29];

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken, or never placed in the bank
    AlreadyTaken,
    /// Pin reserved for the radio module
    Reserved,
}

/// Check a GPIO number before it is used for general I/O
pub fn check_pin(num: u8) -> Result<(), PinError> {
    if num as usize >= GPIO_COUNT {
        return Err(PinError::InvalidPin);
    }
    if RADIO_PINS.contains(&num) {
        return Err(PinError::Reserved);
    }
    Ok(())
}

/// Holds general-purpose pins until they are claimed by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl Default for PinBank {
    fn default() -> Self {
        Self::new()
    }
}

impl PinBank {
    pub fn new() -> Self {
        Self {
            pins: [const { None }; GPIO_COUNT],
        }
    }

    /// Place a pin in the bank under its GPIO number
    ///
    /// Radio pins and out-of-range numbers are refused.
    pub fn insert(&mut self, num: u8, pin: Peri<'static, AnyPin>) -> Result<(), PinError> {
        check_pin(num)?;
        self.pins[num as usize] = Some(pin);
        Ok(())
    }

    /// Take a pin by number
    pub fn take(&mut self, num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        check_pin(num)?;
        self.pins[num as usize].take().ok_or(PinError::AlreadyTaken)
    }
}

/// Build a [`PinBank`] from named peripherals
///
/// Usage:
/// ```ignore
/// let mut bank = pin_bank!(p, 5 => PIN_5, 6 => PIN_6, 7 => PIN_7);
/// let cs = bank.take(board::PIN_CS)?;
/// ```
///
/// Evaluates to `Result<PinBank, PinError>`.
#[macro_export]
macro_rules! pin_bank {
    ($p:ident, $($num:literal => $pin:ident),* $(,)?) => {{
        let mut bank = $crate::pins::PinBank::new();
        let mut result: Result<(), $crate::pins::PinError> = Ok(());
        $(
            if result.is_ok() {
                result = bank.insert($num, embassy_rp::Peri::<embassy_rp::gpio::AnyPin>::from($p.$pin));
            }
        )*
        result.map(|()| bank)
    }};
}
