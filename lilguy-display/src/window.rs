//! Rectangular regions in pixel space
//!
//! A [`Window`] is what the controller's column/row address registers hold:
//! inclusive bounds on both axes. Drawing operations build one, clip it
//! against the panel or sprite, and then stream exactly `area()` pixels.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest width or height a drawing surface may have
///
/// Rasterization works in signed 16-bit coordinates, so every pixel of a
/// surface must be addressable as a non-negative `i16`.
pub const MAX_DIMENSION: u16 = i16::MAX as u16;

/// Inclusive rectangle `(x0, y0)..=(x1, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Window {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
}

impl Window {
    /// Window from corner coordinates; `None` if the corners are swapped
    pub const fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Option<Self> {
        if x0 > x1 || y0 > y1 {
            None
        } else {
            Some(Self { x0, y0, x1, y1 })
        }
    }

    /// Window covering a `width` x `height` surface anchored at the origin
    pub const fn of_size(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self {
                x0: 0,
                y0: 0,
                x1: width - 1,
                y1: height - 1,
            })
        }
    }

    /// Window for a `w` x `h` rectangle with top-left corner at `(x, y)`
    ///
    /// Returns `None` for an empty rectangle or when the far edge does not
    /// fit in 16 bits.
    pub fn from_origin_size(x: u16, y: u16, w: u16, h: u16) -> Option<Self> {
        if w == 0 || h == 0 {
            return None;
        }
        let x1 = x.checked_add(w - 1)?;
        let y1 = y.checked_add(h - 1)?;
        Some(Self { x0: x, y0: y, x1, y1 })
    }

    pub const fn width(&self) -> u16 {
        self.x1 - self.x0 + 1
    }

    pub const fn height(&self) -> u16 {
        self.y1 - self.y0 + 1
    }

    /// Number of pixels the controller expects after a memory-write
    pub const fn area(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }

    /// Whether a (possibly negative) coordinate lies inside
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 as i32 && x <= self.x1 as i32 && y >= self.y0 as i32 && y <= self.y1 as i32
    }

    /// Overlap of two windows
    pub fn intersect(&self, other: &Window) -> Option<Window> {
        Window::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        )
    }

    /// Clip the horizontal span `x0..=x1` on row `y`
    ///
    /// Returns the visible part as a one-row window, or `None` when nothing
    /// of it is inside. A span with `x0 > x1` is empty.
    pub fn clip_span(&self, x0: i32, x1: i32, y: i32) -> Option<Window> {
        if x0 > x1 || y < self.y0 as i32 || y > self.y1 as i32 {
            return None;
        }
        let left = x0.max(self.x0 as i32);
        let right = x1.min(self.x1 as i32);
        if left > right {
            return None;
        }
        Some(Window {
            x0: left as u16,
            y0: y as u16,
            x1: right as u16,
            y1: y as u16,
        })
    }

    /// Clip a signed-origin rectangle against this window
    pub fn clip_rect(&self, x: i32, y: i32, w: u16, h: u16) -> Option<Window> {
        if w == 0 || h == 0 {
            return None;
        }
        let left = x.max(self.x0 as i32);
        let top = y.max(self.y0 as i32);
        let right = (x + w as i32 - 1).min(self.x1 as i32);
        let bottom = (y + h as i32 - 1).min(self.y1 as i32);
        if left > right || top > bottom {
            return None;
        }
        Some(Window {
            x0: left as u16,
            y0: top as u16,
            x1: right as u16,
            y1: bottom as u16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let w = Window::new(10, 20, 19, 24).unwrap();
        assert_eq!(w.width(), 10);
        assert_eq!(w.height(), 5);
        assert_eq!(w.area(), 50);

        assert!(Window::new(5, 0, 4, 0).is_none());
        assert!(Window::of_size(0, 10).is_none());
    }

    #[test]
    fn test_from_origin_size() {
        let w = Window::from_origin_size(50, 130, 220, 220).unwrap();
        assert_eq!(w, Window::new(50, 130, 269, 349).unwrap());

        assert!(Window::from_origin_size(0, 0, 0, 5).is_none());
        assert!(Window::from_origin_size(u16::MAX, 0, 2, 1).is_none());
    }

    #[test]
    fn test_intersect() {
        let a = Window::new(0, 0, 99, 99).unwrap();
        let b = Window::new(50, 80, 150, 120).unwrap();
        assert_eq!(a.intersect(&b), Window::new(50, 80, 99, 99));

        let c = Window::new(100, 0, 120, 10).unwrap();
        assert_eq!(a.intersect(&c), None);
    }

    #[test]
    fn test_clip_span() {
        let bounds = Window::of_size(220, 220).unwrap();

        assert_eq!(bounds.clip_span(-100, 100, 0), Window::new(0, 0, 100, 0));
        assert_eq!(bounds.clip_span(200, 300, 219), Window::new(200, 219, 219, 219));
        assert_eq!(bounds.clip_span(-10, -1, 5), None);
        assert_eq!(bounds.clip_span(0, 10, -1), None);
        assert_eq!(bounds.clip_span(0, 10, 220), None);
        // Reversed ends are empty, not swapped
        assert_eq!(bounds.clip_span(100, -100, 0), None);
        assert_eq!(bounds.clip_span(11, 10, 0), None);
    }

    #[test]
    fn test_clip_rect() {
        let panel = Window::of_size(320, 480).unwrap();

        assert_eq!(
            panel.clip_rect(300, 470, 40, 40),
            Window::new(300, 470, 319, 479)
        );
        assert_eq!(panel.clip_rect(-5, -5, 10, 10), Window::new(0, 0, 4, 4));
        assert_eq!(panel.clip_rect(320, 0, 10, 10), None);
        assert_eq!(panel.clip_rect(0, 0, 0, 10), None);
    }
}
