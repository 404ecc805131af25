//! Input sampling
//!
//! Reads buttons and sticks once per loop iteration and reduces them to an
//! `InputSnapshot`. The analog stick takes priority; the four-way digital
//! stick only moves the character while the analog one is centred.

use defmt::*;
use lilguy_display::{EdgeDetector, InputSnapshot, Joystick};
use lilguy_hal::gpio::ActiveLow;
use lilguy_hal_rp2040::adc::AnalogStick;
use lilguy_hal_rp2040::gpio::RpInput;

/// Four-way digital stick
pub struct DPad<'d> {
    pub up: ActiveLow<RpInput<'d>>,
    pub down: ActiveLow<RpInput<'d>>,
    pub left: ActiveLow<RpInput<'d>>,
    pub right: ActiveLow<RpInput<'d>>,
}

pub struct Controls<'d> {
    primary: ActiveLow<RpInput<'d>>,
    secondary: ActiveLow<RpInput<'d>>,
    primary_edge: EdgeDetector,
    secondary_edge: EdgeDetector,
    stick: AnalogStick<'d>,
    dpad: DPad<'d>,
    joystick: Joystick,
}

impl<'d> Controls<'d> {
    pub fn new(
        primary: RpInput<'d>,
        secondary: RpInput<'d>,
        stick: AnalogStick<'d>,
        dpad: DPad<'d>,
        joystick: Joystick,
    ) -> Self {
        Self {
            primary: ActiveLow::new(primary),
            secondary: ActiveLow::new(secondary),
            primary_edge: EdgeDetector::new(),
            secondary_edge: EdgeDetector::new(),
            stick,
            dpad,
            joystick,
        }
    }

    /// Sample every input once
    pub fn sample(&mut self) -> InputSnapshot {
        let analog = match self.stick.read() {
            Ok((x, y)) => self.joystick.displacement(x, y),
            Err(e) => {
                warn!("joystick read failed: {}", e);
                (0, 0)
            }
        };
        let joystick = if analog != (0, 0) {
            analog
        } else {
            self.joystick.directions(
                self.dpad.up.is_pressed(),
                self.dpad.down.is_pressed(),
                self.dpad.left.is_pressed(),
                self.dpad.right.is_pressed(),
            )
        };

        InputSnapshot {
            primary_pressed: self.primary_edge.update(self.primary.is_pressed()),
            secondary_pressed: self.secondary_edge.update(self.secondary.is_pressed()),
            joystick,
            // No touch controller driver on this board revision
            touch: None,
        }
    }
}
