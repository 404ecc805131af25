//! Dirty-region redraw
//!
//! With no framebuffer on the controller side, moving the sprite leaves its
//! old pixels on the glass until something paints over them. The scheduler
//! decides when a frame is needed and keeps the order that avoids both
//! trails and flicker:
//!
//! ```text
//!   Idle ──invalidate──► Dirty ──flush──► Flushing ──► Idle
//!                          ▲                  │
//!                          └──── bus error ───┘
//! ```
//!
//! Within a flush the previous footprint is erased once, and only when the
//! placement changed, strictly before the sprite is pushed at its new
//! place. Overlap between the two regions is simply overwritten by the push.

use crate::art::Artwork;
use crate::color::Rgb565;
use crate::scene::Scene;
use crate::sprite::Sprite;
use crate::window::Window;

/// Where frames go
///
/// Implemented by the panel; tests substitute a recorder.
pub trait FrameTarget {
    type Error;

    /// Paint `window` with a solid colour
    fn erase(&mut self, window: Window, color: Rgb565) -> Result<(), Self::Error>;

    /// Stream `sprite` with its top-left corner at `(x, y)`
    fn push(&mut self, sprite: &Sprite, x: u16, y: u16) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RedrawState {
    /// Panel matches the scene
    Idle,
    /// Scene changed since the last completed frame
    Dirty,
    /// A frame is being written
    Flushing,
}

/// Outcome of [`RedrawScheduler::flush`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flush {
    /// Nothing to do, no bus traffic
    Skipped,
    /// A frame went out; `erased` when the old footprint was cleared first
    Drawn { erased: bool },
}

pub struct RedrawScheduler {
    state: RedrawState,
}

impl RedrawScheduler {
    /// New schedulers are dirty so the first frame is drawn
    pub fn new() -> Self {
        Self {
            state: RedrawState::Dirty,
        }
    }

    pub fn state(&self) -> RedrawState {
        self.state
    }

    /// Mark the panel stale
    pub fn invalidate(&mut self) {
        self.state = RedrawState::Dirty;
    }

    pub fn is_dirty(&self) -> bool {
        self.state == RedrawState::Dirty
    }

    /// Bring the panel up to date with `scene`, if it is stale
    ///
    /// On error the scheduler is left dirty so the next call retries the
    /// whole frame, and the scene keeps its previous placement.
    pub fn flush<T, A>(
        &mut self,
        scene: &mut Scene,
        sprite: &mut Sprite,
        art: &A,
        target: &mut T,
    ) -> Result<Flush, T::Error>
    where
        T: FrameTarget,
        A: Artwork,
    {
        if self.state != RedrawState::Dirty {
            return Ok(Flush::Skipped);
        }
        self.state = RedrawState::Flushing;

        match Self::draw(scene, sprite, art, target) {
            Ok(erased) => {
                scene.commit();
                self.state = RedrawState::Idle;
                Ok(Flush::Drawn { erased })
            }
            Err(e) => {
                self.state = RedrawState::Dirty;
                Err(e)
            }
        }
    }

    fn draw<T, A>(scene: &Scene, sprite: &mut Sprite, art: &A, target: &mut T) -> Result<bool, T::Error>
    where
        T: FrameTarget,
        A: Artwork,
    {
        let placement = scene.placement();

        let stale = scene
            .previous()
            .filter(|prev| *prev != placement)
            .and_then(|prev| sprite.footprint(prev.x, prev.y));
        if let Some(window) = stale {
            target.erase(window, scene.background())?;
        }

        art.draw(sprite, scene.mood(), scene.color());
        target.push(sprite, placement.x, placement.y)?;
        Ok(stale.is_some())
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new()
    }
}
