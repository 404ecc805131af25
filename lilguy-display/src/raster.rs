//! Circle rasterization
//!
//! Midpoint (integer Bresenham) circle generation against any
//! [`PixelSink`]. All arithmetic is signed 16-bit; coordinates that fall
//! outside the sink's clip bounds are dropped before reaching it.
//!
//! The filled variant emits horizontal spans rather than pixels, so a
//! window-addressed sink such as the panel costs O(r) bus bursts per
//! circle instead of O(r²).

use crate::color::Rgb565;
use crate::sink::PixelSink;

/// Largest radius whose `-2r` decision increment fits in an `i16`
pub const MAX_RADIUS: i16 = i16::MAX / 2;

/// Midpoint circle stepper
///
/// Yields `(x, y)` offsets for one octant, starting after the first step
/// and ending once `x >= y`.
struct Midpoint {
    f: i16,
    ddf_x: i16,
    ddf_y: i16,
    x: i16,
    y: i16,
}

impl Midpoint {
    fn new(r: i16) -> Self {
        Self {
            f: 1 - r,
            ddf_x: 1,
            ddf_y: -2 * r,
            x: 0,
            y: r,
        }
    }
}

impl Iterator for Midpoint {
    type Item = (i16, i16);

    fn next(&mut self) -> Option<Self::Item> {
        if self.x >= self.y {
            return None;
        }
        if self.f >= 0 {
            self.y -= 1;
            self.ddf_y += 2;
            self.f += self.ddf_y;
        }
        self.x += 1;
        self.ddf_x += 2;
        self.f += self.ddf_x;
        Some((self.x, self.y))
    }
}

fn plot<S: PixelSink>(sink: &mut S, x: i16, y: i16, color: Rgb565) -> Result<(), S::Error> {
    if sink.clip_bounds().contains(x as i32, y as i32) {
        sink.put_pixel(x, y, color)?;
    }
    Ok(())
}

fn span<S: PixelSink>(sink: &mut S, x0: i16, x1: i16, y: i16, color: Rgb565) -> Result<(), S::Error> {
    if let Some(clipped) = sink.clip_bounds().clip_span(x0 as i32, x1 as i32, y as i32) {
        sink.put_span(clipped.x0 as i16, clipped.x1 as i16, y, color)?;
    }
    Ok(())
}

/// Draw the one-pixel outline of a circle
///
/// Emits the eight octant reflections of every step. A radius of zero or
/// less draws nothing.
pub fn circle_outline<S: PixelSink>(
    sink: &mut S,
    cx: i16,
    cy: i16,
    r: i16,
    color: Rgb565,
) -> Result<(), S::Error> {
    if r <= 0 {
        return Ok(());
    }
    for (x, y) in Midpoint::new(r.min(MAX_RADIUS)) {
        plot(sink, cx.saturating_add(x), cy.saturating_add(y), color)?;
        plot(sink, cx.saturating_sub(x), cy.saturating_add(y), color)?;
        plot(sink, cx.saturating_add(x), cy.saturating_sub(y), color)?;
        plot(sink, cx.saturating_sub(x), cy.saturating_sub(y), color)?;
        plot(sink, cx.saturating_add(y), cy.saturating_add(x), color)?;
        plot(sink, cx.saturating_sub(y), cy.saturating_add(x), color)?;
        plot(sink, cx.saturating_add(y), cy.saturating_sub(x), color)?;
        plot(sink, cx.saturating_sub(y), cy.saturating_sub(x), color)?;
    }
    Ok(())
}

/// Draw a solid disc
///
/// The centre row is emitted first at full width (`cx - r ..= cx + r`),
/// then four mirrored spans per step. A negative radius draws nothing;
/// radius zero draws the centre pixel.
pub fn circle_filled<S: PixelSink>(
    sink: &mut S,
    cx: i16,
    cy: i16,
    r: i16,
    color: Rgb565,
) -> Result<(), S::Error> {
    if r < 0 {
        return Ok(());
    }
    let r = r.min(MAX_RADIUS);

    span(sink, cx.saturating_sub(r), cx.saturating_add(r), cy, color)?;

    for (x, y) in Midpoint::new(r) {
        span(sink, cx.saturating_sub(x), cx.saturating_add(x), cy.saturating_add(y), color)?;
        span(sink, cx.saturating_sub(x), cx.saturating_add(x), cy.saturating_sub(y), color)?;
        span(sink, cx.saturating_sub(y), cx.saturating_add(y), cy.saturating_add(x), color)?;
        span(sink, cx.saturating_sub(y), cx.saturating_add(y), cy.saturating_sub(x), color)?;
    }
    Ok(())
}

/// Fill a `w` x `h` rectangle with its top-left corner at `(x, y)`
///
/// One span per visible row.
pub fn fill_rect<S: PixelSink>(
    sink: &mut S,
    x: i16,
    y: i16,
    w: u16,
    h: u16,
    color: Rgb565,
) -> Result<(), S::Error> {
    let Some(visible) = sink.clip_bounds().clip_rect(x as i32, y as i32, w, h) else {
        return Ok(());
    };
    for row in visible.y0..=visible.y1 {
        sink.put_span(visible.x0 as i16, visible.x1 as i16, row as i16, color)?;
    }
    Ok(())
}
