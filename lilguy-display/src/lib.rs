//! Display pipeline for the Lil Guy handheld
//!
//! Drives an ST7796-class SPI panel that has no host-side framebuffer and
//! composites an animated character onto it:
//!
//! - [`bus`]: command/data framing and addressable-window programming
//! - [`panel`]: controller bring-up, window fills, sprite blits
//! - [`sink`] and [`raster`]: circle and rectangle rasterization against
//!   any pixel sink (the panel itself or an offscreen sprite)
//! - [`sprite`]: heap-allocated offscreen RGB565 buffer
//! - [`scene`], [`input`]: the animated entity and the input snapshot that
//!   moves it
//! - [`art`]: what gets drawn into the sprite
//! - [`redraw`]: decides what to re-stream each frame
//!
//! # Data flow
//!
//! ```text
//! InputSnapshot ──► Scene ──► RedrawScheduler ──► Artwork ──► Sprite
//!                                    │                          │
//!                                    ▼                          ▼
//!                             erase (fill_rect)            push (window)
//!                                    └──────────► Panel ◄───────┘
//!                                                   │
//!                                               BusSession ──► SPI
//! ```
//!
//! Only [`bus::BusSession`] touches hardware; everything above it is
//! generic over the `lilguy-hal` traits and runs on the host in tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod art;
pub mod bus;
pub mod color;
pub mod input;
pub mod panel;
pub mod raster;
pub mod redraw;
pub mod scene;
pub mod sink;
pub mod sprite;
pub mod window;

#[cfg(test)]
mod mock;

// Re-export key types
pub use art::{Artwork, LilGuy};
pub use bus::{BusError, BusSession};
pub use color::Rgb565;
pub use input::{EdgeDetector, InputSnapshot, Joystick, JoystickConfig, TouchPoint};
pub use panel::{Panel, PanelConfig};
pub use redraw::{Flush, FrameTarget, RedrawScheduler, RedrawState};
pub use scene::{palette, Mood, Placement, Scene, SceneConfig, PALETTE};
pub use sink::PixelSink;
pub use sprite::{Sprite, SpriteError};
pub use window::Window;
