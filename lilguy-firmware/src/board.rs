//! Board configuration
//!
//! Constants generated from `board.toml` at build time, plus conversions
//! into the library config types.

use lilguy_display::{JoystickConfig, PanelConfig, Placement, Rgb565, SceneConfig};
use lilguy_hal::spi::Mode;
use lilguy_hal::SpiConfig;

include!(concat!(env!("OUT_DIR"), "/board.rs"));

pub fn spi_config() -> SpiConfig {
    let mode = match SPI_MODE {
        1 => Mode::Mode1,
        2 => Mode::Mode2,
        3 => Mode::Mode3,
        _ => Mode::Mode0,
    };
    SpiConfig::new(SPI_FREQUENCY_HZ, mode)
}

pub fn panel_config() -> PanelConfig {
    PanelConfig {
        width: PANEL_WIDTH,
        height: PANEL_HEIGHT,
    }
}

pub fn scene_config() -> SceneConfig {
    SceneConfig {
        panel: panel_config(),
        sprite_width: SPRITE_WIDTH,
        sprite_height: SPRITE_HEIGHT,
        start: Placement::new(SPRITE_X, SPRITE_Y),
        background: Rgb565::new(BACKGROUND),
        touch_repeat: touch_repeat(),
    }
}

/// Held-touch colour interval in loop iterations
fn touch_repeat() -> u16 {
    (TOUCH_REPEAT_MS / FRAME_MS).clamp(1, u16::MAX as u64) as u16
}

pub fn joystick_config() -> JoystickConfig {
    JoystickConfig {
        center: JOY_CENTER,
        dead_zone: JOY_DEAD_ZONE,
        max_step: JOY_MAX_STEP,
        invert_y: JOY_INVERT_Y,
        ..Default::default()
    }
}
