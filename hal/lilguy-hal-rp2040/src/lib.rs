//! RP2040/RP2350 HAL for the Lil Guy firmware
//!
//! Implements the shared `lilguy-hal` traits on top of `embassy-rp`, plus
//! chip-specific helpers:
//!
//! - GPIO wrappers for panel control lines, buttons and the status LED
//! - Blocking transmit-only SPI master for the panel link
//! - Busy-wait delay for controller reset/settle timing
//! - Config-driven pin allocation by GPIO number
//! - ADC channel mapping and the analog joystick reader

#![no_std]

pub mod adc;
pub mod delay;
pub mod gpio;
pub mod pins;
pub mod spi;

// Re-export shared traits from lilguy-hal for convenience
pub use lilguy_hal::{Delay, InputPin, OutputPin, SpiBus, SpiConfig};
