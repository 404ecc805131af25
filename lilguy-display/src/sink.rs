//! Pixel sink capability
//!
//! Anything that accepts pixels at signed coordinates: the physical panel
//! (one bus burst per span) and an offscreen [`Sprite`](crate::sprite::Sprite)
//! (one memory store per pixel). The rasterizer only ever talks to this
//! trait.

use crate::color::Rgb565;
use crate::window::Window;

/// Destination for rasterized pixels
///
/// Coordinates outside [`clip_bounds`](PixelSink::clip_bounds) are dropped
/// without error.
pub trait PixelSink {
    /// Error raised by the underlying transport
    type Error;

    /// Region that accepts pixels
    fn clip_bounds(&self) -> Window;

    /// Set one pixel
    fn put_pixel(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), Self::Error>;

    /// Set the horizontal run `x0..=x1` on row `y`; empty when `x0 > x1`
    ///
    /// The default writes pixel by pixel; sinks with a cheaper bulk path
    /// override it.
    fn put_span(&mut self, x0: i16, x1: i16, y: i16, color: Rgb565) -> Result<(), Self::Error> {
        let Some(span) = self.clip_bounds().clip_span(x0 as i32, x1 as i32, y as i32) else {
            return Ok(());
        };
        for x in span.x0..=span.x1 {
            self.put_pixel(x as i16, y, color)?;
        }
        Ok(())
    }
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    type Error = S::Error;

    fn clip_bounds(&self) -> Window {
        (**self).clip_bounds()
    }

    fn put_pixel(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), Self::Error> {
        (**self).put_pixel(x, y, color)
    }

    fn put_span(&mut self, x0: i16, x1: i16, y: i16, color: Rgb565) -> Result<(), Self::Error> {
        (**self).put_span(x0, x1, y, color)
    }
}
