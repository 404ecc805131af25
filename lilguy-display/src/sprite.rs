//! Offscreen sprite buffer
//!
//! A heap-allocated RGB565 grid the character is composited into before
//! being streamed to the panel in one window burst. The panel never shows
//! a half-drawn frame because visible memory is only ever replaced a whole
//! window at a time.

use alloc::vec::Vec;
use core::convert::Infallible;

use lilguy_hal::{Delay, OutputPin, SpiBus};

use crate::bus::BusError;
use crate::color::Rgb565;
use crate::panel::Panel;
use crate::raster;
use crate::sink::PixelSink;
use crate::window::{Window, MAX_DIMENSION};

/// Sprite creation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpriteError {
    /// Width or height was zero
    ZeroSize,
    /// Width or height exceeds [`MAX_DIMENSION`]
    TooLarge,
    /// The heap could not hold width x height pixels
    AllocationFailed,
}

/// Owned row-major pixel grid
pub struct Sprite {
    width: u16,
    height: u16,
    pixels: Vec<Rgb565>,
}

impl Sprite {
    /// Allocate a black `width` x `height` sprite
    ///
    /// Allocation failure is reported rather than aborting, so the caller
    /// can run without the animation.
    pub fn new(width: u16, height: u16) -> Result<Self, SpriteError> {
        if width == 0 || height == 0 {
            return Err(SpriteError::ZeroSize);
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SpriteError::TooLarge);
        }
        let len = width as usize * height as usize;

        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| SpriteError::AllocationFailed)?;
        pixels.resize(len, Rgb565::BLACK);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Sprite-local bounds `(0, 0)..=(w-1, h-1)`
    pub fn bounds(&self) -> Window {
        Window {
            x0: 0,
            y0: 0,
            x1: self.width - 1,
            y1: self.height - 1,
        }
    }

    /// Panel region the sprite covers when anchored at `(x, y)`
    pub fn footprint(&self, x: u16, y: u16) -> Option<Window> {
        Window::from_origin_size(x, y, self.width, self.height)
    }

    /// Row-major pixel data
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Pixel at sprite-local coordinates
    pub fn pixel(&self, x: u16, y: u16) -> Option<Rgb565> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixels of a sprite-local sub-rectangle, row-major
    pub fn region(&self, local: Window) -> impl Iterator<Item = Rgb565> + '_ {
        let local = local.intersect(&self.bounds());
        let width = self.width as usize;
        local.into_iter().flat_map(move |w| {
            (w.y0..=w.y1).flat_map(move |y| {
                let start = y as usize * width + w.x0 as usize;
                let end = y as usize * width + w.x1 as usize;
                self.pixels[start..=end].iter().copied()
            })
        })
    }

    /// Set every pixel
    pub fn fill(&mut self, color: Rgb565) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the sprite
    pub fn fill_rect(&mut self, x: i16, y: i16, w: u16, h: u16, color: Rgb565) {
        raster::fill_rect(self, x, y, w, h, color).unwrap_or_else(|never| match never {});
    }

    /// Draw a solid disc, clipped to the sprite
    pub fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, color: Rgb565) {
        raster::circle_filled(self, cx, cy, r, color).unwrap_or_else(|never| match never {});
    }

    /// Draw a circle outline, clipped to the sprite
    pub fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, color: Rgb565) {
        raster::circle_outline(self, cx, cy, r, color).unwrap_or_else(|never| match never {});
    }

    /// Stream the sprite to the panel with its top-left corner at `(x, y)`
    pub fn push<SPI, CS, DC, RST, D>(
        &self,
        panel: &mut Panel<SPI, CS, DC, RST, D>,
        x: u16,
        y: u16,
    ) -> Result<(), BusError<SPI::Error>>
    where
        SPI: SpiBus,
        CS: OutputPin,
        DC: OutputPin,
        RST: OutputPin,
        D: Delay,
    {
        panel.push(self, x, y)
    }
}

impl PixelSink for Sprite {
    type Error = Infallible;

    fn clip_bounds(&self) -> Window {
        self.bounds()
    }

    fn put_pixel(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), Infallible> {
        if x >= 0 && y >= 0 && (x as u16) < self.width && (y as u16) < self.height {
            let idx = self.index(x as u16, y as u16);
            self.pixels[idx] = color;
        }
        Ok(())
    }

    fn put_span(&mut self, x0: i16, x1: i16, y: i16, color: Rgb565) -> Result<(), Infallible> {
        if let Some(span) = self.bounds().clip_span(x0 as i32, x1 as i32, y as i32) {
            let start = self.index(span.x0, span.y0);
            let end = self.index(span.x1, span.y0);
            self.pixels[start..=end].fill(color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create() {
        let sprite = Sprite::new(220, 220).unwrap();
        assert_eq!(sprite.pixels().len(), 220 * 220);
        assert!(sprite.pixels().iter().all(|&p| p == Rgb565::BLACK));

        assert_eq!(Sprite::new(0, 10).err(), Some(SpriteError::ZeroSize));
        assert_eq!(Sprite::new(10, 0).err(), Some(SpriteError::ZeroSize));
    }

    #[test]
    fn test_dimensions_must_fit_i16() {
        assert_eq!(Sprite::new(40_000, 1).err(), Some(SpriteError::TooLarge));
        assert_eq!(Sprite::new(1, MAX_DIMENSION + 1).err(), Some(SpriteError::TooLarge));

        // The widest accepted sprite is painted end to end
        let mut sprite = Sprite::new(MAX_DIMENSION, 1).unwrap();
        sprite.fill_rect(0, 0, MAX_DIMENSION, 1, Rgb565::WHITE);
        assert!(sprite.pixels().iter().all(|&p| p == Rgb565::WHITE));
    }

    #[test]
    fn test_fill() {
        let mut sprite = Sprite::new(4, 3).unwrap();
        sprite.fill(Rgb565::CYAN);
        assert!(sprite.pixels().iter().all(|&p| p == Rgb565::CYAN));
    }

    #[test]
    fn test_fill_circle_clipped_at_origin() {
        let mut sprite = Sprite::new(220, 220).unwrap();
        sprite.fill(Rgb565::BLACK);
        sprite.fill_circle(0, 0, 100, Rgb565::YELLOW);

        assert_eq!(sprite.pixel(0, 0), Some(Rgb565::YELLOW));
        assert_eq!(sprite.pixel(100, 0), Some(Rgb565::YELLOW));
        assert_eq!(sprite.pixel(0, 100), Some(Rgb565::YELLOW));
        assert_eq!(sprite.pixel(101, 0), Some(Rgb565::BLACK));
        assert_eq!(sprite.pixel(80, 80), Some(Rgb565::BLACK));
        assert_eq!(sprite.pixel(219, 219), Some(Rgb565::BLACK));

        // Roughly a quarter of the disc landed in the buffer
        let painted = sprite.pixels().iter().filter(|&&p| p == Rgb565::YELLOW).count();
        assert!(painted > 7_700 && painted < 8_300);
    }

    #[test]
    fn test_fill_circle_entirely_outside() {
        let mut sprite = Sprite::new(50, 50).unwrap();
        sprite.fill_circle(-200, -200, 30, Rgb565::RED);
        sprite.fill_circle(25, 25, -1, Rgb565::RED);
        assert!(sprite.pixels().iter().all(|&p| p == Rgb565::BLACK));
    }

    #[test]
    fn test_put_pixel_ignores_out_of_bounds() {
        let mut sprite = Sprite::new(2, 2).unwrap();
        sprite.put_pixel(-1, 0, Rgb565::RED).unwrap();
        sprite.put_pixel(2, 0, Rgb565::RED).unwrap();
        sprite.put_pixel(0, 2, Rgb565::RED).unwrap();
        sprite.put_pixel(1, 1, Rgb565::RED).unwrap();

        assert_eq!(
            sprite.pixels(),
            &[Rgb565::BLACK, Rgb565::BLACK, Rgb565::BLACK, Rgb565::RED]
        );
    }

    #[test]
    fn test_region_row_major() {
        let mut sprite = Sprite::new(3, 3).unwrap();
        for y in 0..3i16 {
            for x in 0..3i16 {
                sprite
                    .put_pixel(x, y, Rgb565::new((y * 3 + x) as u16))
                    .unwrap();
            }
        }

        let region: Vec<u16> = sprite
            .region(Window::new(1, 1, 2, 2).unwrap())
            .map(Rgb565::raw)
            .collect();
        assert_eq!(region, vec![4, 5, 7, 8]);

        let clipped: Vec<u16> = sprite
            .region(Window::new(2, 0, 10, 0).unwrap())
            .map(Rgb565::raw)
            .collect();
        assert_eq!(clipped, vec![2]);
    }

    #[test]
    fn test_fill_rect() {
        let mut sprite = Sprite::new(4, 4).unwrap();
        sprite.fill_rect(2, 2, 10, 10, Rgb565::GREEN);
        let green = sprite.pixels().iter().filter(|&&p| p == Rgb565::GREEN).count();
        assert_eq!(green, 4);
        assert_eq!(sprite.pixel(3, 3), Some(Rgb565::GREEN));
        assert_eq!(sprite.pixel(1, 3), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_footprint() {
        let sprite = Sprite::new(220, 220).unwrap();
        assert_eq!(sprite.footprint(50, 130), Window::new(50, 130, 269, 349));
    }
}
