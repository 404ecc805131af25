//! ST7796 panel driver
//!
//! Builds on [`BusSession`]: one-time controller bring-up, then every draw
//! is a window program followed by a pixel stream. Requests that reach past
//! the panel edge are clipped; requests entirely off-panel send nothing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use lilguy_hal::{Delay, OutputPin, SpiBus};

use crate::bus::{cmd, BusError, BusSession};
use crate::color::Rgb565;
use crate::raster;
use crate::redraw::FrameTarget;
use crate::sink::PixelSink;
use crate::sprite::Sprite;
use crate::window::{Window, MAX_DIMENSION};

/// Controller-mandated waits, in milliseconds
///
/// Commands issued before these elapse are undefined behaviour on the
/// controller side; they are not tunables.
pub mod timing {
    /// Reset line held low
    pub const RESET_PULSE_MS: u32 = 10;
    /// After releasing reset
    pub const RESET_SETTLE_MS: u32 = 120;
    /// After the software reset command
    pub const SOFTWARE_RESET_MS: u32 = 120;
    /// After sleep out, while the internal supplies start
    pub const SLEEP_OUT_MS: u32 = 120;
}

/// Panel geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Width in pixels (portrait)
    pub width: u16,
    /// Height in pixels (portrait)
    pub height: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 480,
        }
    }
}

/// Framebuffer-less SPI panel
pub struct Panel<SPI, CS, DC, RST, D> {
    bus: BusSession<SPI, CS, DC>,
    rst: RST,
    delay: D,
    bounds: Window,
}

impl<SPI, CS, DC, RST, D> Panel<SPI, CS, DC, RST, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    D: Delay,
{
    /// Wrap a bus session and the reset line
    ///
    /// Each side is clamped to `1..=MAX_DIMENSION`.
    pub fn new(bus: BusSession<SPI, CS, DC>, mut rst: RST, delay: D, config: PanelConfig) -> Self {
        rst.set_high();
        let bounds = Window {
            x0: 0,
            y0: 0,
            x1: config.width.clamp(1, MAX_DIMENSION) - 1,
            y1: config.height.clamp(1, MAX_DIMENSION) - 1,
        };
        Self {
            bus,
            rst,
            delay,
            bounds,
        }
    }

    pub fn width(&self) -> u16 {
        self.bounds.width()
    }

    pub fn height(&self) -> u16 {
        self.bounds.height()
    }

    /// Whole-panel window
    pub fn bounds(&self) -> Window {
        self.bounds
    }

    /// Hardware reset and controller bring-up
    ///
    /// Leaves the panel awake, in RGB565 mode, with the display on. Panel
    /// memory content is undefined afterwards; callers clear it.
    pub fn init(&mut self) -> Result<(), BusError<SPI::Error>> {
        self.rst.set_low();
        self.delay.delay_ms(timing::RESET_PULSE_MS);
        self.rst.set_high();
        self.delay.delay_ms(timing::RESET_SETTLE_MS);

        self.bus.write_command(cmd::SOFTWARE_RESET)?;
        self.delay.delay_ms(timing::SOFTWARE_RESET_MS);

        self.bus.write_command(cmd::SLEEP_OUT)?;
        self.delay.delay_ms(timing::SLEEP_OUT_MS);

        self.bus.write_command(cmd::PIXEL_FORMAT)?;
        self.bus.write_data(cmd::PIXEL_FORMAT_RGB565)?;

        self.bus.write_command(cmd::DISPLAY_ON)
    }

    /// Program the address window, clipped to the panel
    ///
    /// Returns the window actually programmed, `None` if nothing of it is
    /// on the panel (in which case nothing was sent).
    pub fn set_window(&mut self, window: Window) -> Result<Option<Window>, BusError<SPI::Error>> {
        let Some(visible) = window.intersect(&self.bounds) else {
            return Ok(None);
        };
        self.bus.set_window(visible)?;
        Ok(Some(visible))
    }

    /// Fill a window with one colour
    pub fn fill_window(&mut self, window: Window, color: Rgb565) -> Result<(), BusError<SPI::Error>> {
        if let Some(visible) = self.set_window(window)? {
            self.bus.write_repeated(color, visible.area())?;
        }
        Ok(())
    }

    /// Fill a `w` x `h` rectangle with its top-left corner at `(x, y)`
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Rgb565,
    ) -> Result<(), BusError<SPI::Error>> {
        match self.bounds.clip_rect(x as i32, y as i32, w, h) {
            Some(visible) => self.fill_window(visible, color),
            None => Ok(()),
        }
    }

    /// Fill the whole panel
    pub fn clear(&mut self, color: Rgb565) -> Result<(), BusError<SPI::Error>> {
        self.fill_window(self.bounds, color)
    }

    /// Draw a circle outline directly on the panel (one burst per pixel)
    pub fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, color: Rgb565) -> Result<(), BusError<SPI::Error>> {
        raster::circle_outline(self, cx, cy, r, color)
    }

    /// Draw a solid disc directly on the panel (one burst per scanline)
    pub fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, color: Rgb565) -> Result<(), BusError<SPI::Error>> {
        raster::circle_filled(self, cx, cy, r, color)
    }

    /// Stream a sprite with its top-left corner at `(x, y)`
    ///
    /// The whole visible part goes out as one window and one burst,
    /// row-major. Parts past the panel edge are skipped.
    pub fn push(&mut self, sprite: &Sprite, x: u16, y: u16) -> Result<(), BusError<SPI::Error>> {
        let Some(visible) = self
            .bounds
            .clip_rect(x as i32, y as i32, sprite.width(), sprite.height())
        else {
            return Ok(());
        };
        let local = Window {
            x0: visible.x0 - x,
            y0: visible.y0 - y,
            x1: visible.x1 - x,
            y1: visible.y1 - y,
        };
        self.bus.set_window(visible)?;
        self.bus.write_pixels(sprite.region(local))
    }
}

impl<SPI, CS, DC, RST, D> PixelSink for Panel<SPI, CS, DC, RST, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    D: Delay,
{
    type Error = BusError<SPI::Error>;

    fn clip_bounds(&self) -> Window {
        self.bounds
    }

    fn put_pixel(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), Self::Error> {
        if !self.bounds.contains(x as i32, y as i32) {
            return Ok(());
        }
        self.fill_rect(x as u16, y as u16, 1, 1, color)
    }

    fn put_span(&mut self, x0: i16, x1: i16, y: i16, color: Rgb565) -> Result<(), Self::Error> {
        match self.bounds.clip_span(x0 as i32, x1 as i32, y as i32) {
            Some(span) => self.fill_window(span, color),
            None => Ok(()),
        }
    }
}

impl<SPI, CS, DC, RST, D> FrameTarget for Panel<SPI, CS, DC, RST, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    D: Delay,
{
    type Error = BusError<SPI::Error>;

    fn erase(&mut self, window: Window, color: Rgb565) -> Result<(), Self::Error> {
        self.fill_window(window, color)
    }

    fn push(&mut self, sprite: &Sprite, x: u16, y: u16) -> Result<(), Self::Error> {
        Panel::push(self, sprite, x, y)
    }
}
