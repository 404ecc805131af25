//! Input snapshot
//!
//! The control loop samples buttons, joysticks and touch once per
//! iteration and reduces them to an [`InputSnapshot`]: press edges and a
//! dead-zoned displacement. The scene only ever sees the snapshot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Last known touch coordinate in panel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

/// One control-loop iteration's worth of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    /// Primary button went from released to pressed
    pub primary_pressed: bool,
    /// Secondary button went from released to pressed
    pub secondary_pressed: bool,
    /// Signed displacement in pixels, dead zone already applied
    pub joystick: (i16, i16),
    /// Touch currently held, with its position
    pub touch: Option<TouchPoint>,
}

/// Turns a level into a press edge
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    was_pressed: bool,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Feed the current level; true only on the released → pressed transition
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        edge
    }
}

/// Analog stick calibration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JoystickConfig {
    /// Raw reading at rest (12-bit ADC midpoint)
    pub center: u16,
    /// Raw offset from centre treated as no movement
    pub dead_zone: u16,
    /// Raw offset from centre at full deflection
    pub full_scale: u16,
    /// Displacement at full deflection, in pixels per iteration
    pub max_step: i16,
    /// Flip the Y axis (stick "up" reads high on some boards)
    pub invert_y: bool,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            center: 2048,
            dead_zone: 300,
            full_scale: 2047,
            max_step: 10,
            invert_y: false,
        }
    }
}

/// Converts raw stick readings into displacement
#[derive(Debug, Clone, Copy)]
pub struct Joystick {
    config: JoystickConfig,
}

impl Joystick {
    pub fn new(config: JoystickConfig) -> Self {
        Self { config }
    }

    /// Dead-zoned displacement for a raw `(x, y)` ADC pair
    pub fn displacement(&self, raw_x: u16, raw_y: u16) -> (i16, i16) {
        let dx = self.axis(raw_x);
        let dy = self.axis(raw_y);
        (dx, if self.config.invert_y { -dy } else { dy })
    }

    fn axis(&self, raw: u16) -> i16 {
        let cfg = &self.config;
        let offset = raw as i32 - cfg.center as i32;
        let magnitude = offset.abs();
        if magnitude <= cfg.dead_zone as i32 {
            return 0;
        }

        let span = (cfg.full_scale as i32 - cfg.dead_zone as i32).max(1);
        let travel = (magnitude - cfg.dead_zone as i32).min(span);
        // Round up so any reading past the dead zone moves at least one pixel
        let step = ((travel * cfg.max_step as i32 + span - 1) / span) as i16;
        if offset < 0 {
            -step
        } else {
            step
        }
    }

    /// Displacement for a four-way digital stick
    pub fn directions(&self, up: bool, down: bool, left: bool, right: bool) -> (i16, i16) {
        let step = self.config.max_step;
        let dx = match (left, right) {
            (true, false) => -step,
            (false, true) => step,
            _ => 0,
        };
        let dy = match (up, down) {
            (true, false) => -step,
            (false, true) => step,
            _ => 0,
        };
        (dx, dy)
    }
}
