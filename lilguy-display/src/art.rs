//! Character artwork
//!
//! Renders the Lil Guy into a sprite: a round body in the palette colour,
//! two eyes and a mouth drawn as a string of small discs along an arc.
//! Geometry is laid out for a 220 pixel square and scaled to the sprite's
//! shorter side.

use core::f32::consts::PI;

use crate::color::Rgb565;
use crate::scene::Mood;
use crate::sprite::Sprite;

/// Something that can paint itself into a sprite
pub trait Artwork {
    /// Overwrite the whole sprite with the current look
    fn draw(&self, sprite: &mut Sprite, mood: Mood, color: Rgb565);
}

/// Reference size the proportions below are expressed in
const DESIGN_SIZE: i32 = 220;

const BODY_RADIUS: i32 = 100;
const EYE_DX: i32 = 35;
const EYE_Y: i32 = 85;
const EYE_RADIUS: i32 = 18;
const HIGHLIGHT_OFFSET: i32 = 6;
const HIGHLIGHT_RADIUS: i32 = 6;

const MOUTH_RADIUS: i32 = 45;
const MOUTH_DOT_RADIUS: i32 = 5;
/// Arc centre for the smile; the mouth hangs below it
const SMILE_CENTER_Y: i32 = 120;
/// Arc centre for the frown; the mouth bows above it
const FROWN_CENTER_Y: i32 = 185;
const ARC_SWEEP_DEG: f32 = 120.0;
const ARC_STEP_DEG: f32 = 6.0;

pub struct LilGuy {
    background: Rgb565,
}

impl LilGuy {
    pub fn new(background: Rgb565) -> Self {
        Self { background }
    }
}

impl Default for LilGuy {
    fn default() -> Self {
        Self::new(Rgb565::BLACK)
    }
}

/// Maps design-space lengths onto the sprite
struct Scale {
    size: i32,
}

impl Scale {
    fn of(sprite: &Sprite) -> Self {
        Self {
            size: sprite.width().min(sprite.height()) as i32,
        }
    }

    fn len(&self, n: i32) -> i16 {
        (n * self.size / DESIGN_SIZE) as i16
    }
}

impl Artwork for LilGuy {
    fn draw(&self, sprite: &mut Sprite, mood: Mood, color: Rgb565) {
        let s = Scale::of(sprite);
        let cx = (sprite.width() / 2) as i16;
        let cy = (sprite.height() / 2) as i16;
        // Design-space origin in sprite coordinates
        let left = cx - s.len(DESIGN_SIZE / 2);
        let top = cy - s.len(DESIGN_SIZE / 2);

        sprite.fill(self.background);
        sprite.fill_circle(cx, cy, s.len(BODY_RADIUS), color);

        for side in [-1, 1] {
            let ex = cx + side * s.len(EYE_DX);
            let ey = top + s.len(EYE_Y);
            sprite.fill_circle(ex, ey, s.len(EYE_RADIUS), Rgb565::BLACK);
            sprite.fill_circle(
                ex - s.len(HIGHLIGHT_OFFSET),
                ey - s.len(HIGHLIGHT_OFFSET),
                s.len(HIGHLIGHT_RADIUS),
                Rgb565::WHITE,
            );
        }

        let (arc_y, start_deg) = match mood {
            Mood::Happy => (SMILE_CENTER_Y, 30.0),
            Mood::Sad => (FROWN_CENTER_Y, 210.0),
        };
        let arc_cx = left + s.len(DESIGN_SIZE / 2);
        let arc_cy = top + s.len(arc_y);
        let radius = s.len(MOUTH_RADIUS) as f32;
        let dot = s.len(MOUTH_DOT_RADIUS).max(1);

        let steps = (ARC_SWEEP_DEG / ARC_STEP_DEG) as u32;
        for i in 0..=steps {
            let theta = (start_deg + i as f32 * ARC_STEP_DEG) * PI / 180.0;
            let x = arc_cx + libm::roundf(radius * libm::cosf(theta)) as i16;
            let y = arc_cy + libm::roundf(radius * libm::sinf(theta)) as i16;
            sprite.fill_circle(x, y, dot, Rgb565::BLACK);
        }
    }
}
