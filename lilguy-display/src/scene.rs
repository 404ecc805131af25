//! Scene state
//!
//! Where the character sits, how it looks, and where it was last drawn.
//! The scene is mutated only by [`Scene::apply`] and [`Scene::commit`];
//! the redraw scheduler reads it to decide what to erase.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Rgb565;
use crate::input::InputSnapshot;
use crate::panel::PanelConfig;

/// Facial expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mood {
    #[default]
    Happy,
    Sad,
}

impl Mood {
    pub fn toggled(self) -> Self {
        match self {
            Mood::Happy => Mood::Sad,
            Mood::Sad => Mood::Happy,
        }
    }
}

/// Body colours cycled through by the secondary button and touch
pub const PALETTE: [Rgb565; 7] = [
    Rgb565::YELLOW,
    Rgb565::CYAN,
    Rgb565::MAGENTA,
    Rgb565::GREEN,
    Rgb565::ORANGE,
    Rgb565::RED,
    Rgb565::BLUE,
];

/// Palette colour at `index`, wrapping
pub fn palette(index: usize) -> Rgb565 {
    PALETTE[index % PALETTE.len()]
}

/// Top-left corner of the sprite on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub x: u16,
    pub y: u16,
}

impl Placement {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Scene geometry and starting state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneConfig {
    pub panel: PanelConfig,
    pub sprite_width: u16,
    pub sprite_height: u16,
    pub start: Placement,
    pub background: Rgb565,
    /// Loop iterations between colour steps while touch is held
    pub touch_repeat: u16,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            panel: PanelConfig::default(),
            sprite_width: 220,
            sprite_height: 220,
            start: Placement::new(50, 130),
            background: Rgb565::BLACK,
            touch_repeat: 10,
        }
    }
}

pub struct Scene {
    placement: Placement,
    previous: Option<Placement>,
    mood: Mood,
    color_index: usize,
    max_x: u16,
    max_y: u16,
    background: Rgb565,
    touch_repeat: u16,
    /// Iterations left until the next held-touch colour step
    touch_wait: Option<u16>,
}

impl Scene {
    /// Start at `config.start`, pulled back onto the panel if needed
    pub fn new(config: &SceneConfig) -> Self {
        let max_x = config.panel.width.saturating_sub(config.sprite_width);
        let max_y = config.panel.height.saturating_sub(config.sprite_height);
        Self {
            placement: Placement::new(config.start.x.min(max_x), config.start.y.min(max_y)),
            previous: None,
            mood: Mood::default(),
            color_index: 0,
            max_x,
            max_y,
            background: config.background,
            touch_repeat: config.touch_repeat.max(1),
            touch_wait: None,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Placement at the last completed redraw, if any
    pub fn previous(&self) -> Option<Placement> {
        self.previous
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn color(&self) -> Rgb565 {
        palette(self.color_index)
    }

    pub fn background(&self) -> Rgb565 {
        self.background
    }

    /// Shift by `(dx, dy)`, clamped to keep the sprite fully on the panel
    pub fn move_by(&mut self, dx: i16, dy: i16) -> bool {
        let x = (self.placement.x as i32 + dx as i32).clamp(0, self.max_x as i32) as u16;
        let y = (self.placement.y as i32 + dy as i32).clamp(0, self.max_y as i32) as u16;
        let next = Placement::new(x, y);
        let changed = next != self.placement;
        self.placement = next;
        changed
    }

    pub fn toggle_mood(&mut self) {
        self.mood = self.mood.toggled();
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTE.len();
    }

    /// Whether a held touch is due a colour step this iteration
    ///
    /// Steps on the first touched iteration, then every `touch_repeat`
    /// iterations until released.
    fn touch_step(&mut self, held: bool) -> bool {
        if !held {
            self.touch_wait = None;
            return false;
        }
        match self.touch_wait {
            Some(n) if n > 1 => {
                self.touch_wait = Some(n - 1);
                false
            }
            _ => {
                self.touch_wait = Some(self.touch_repeat);
                true
            }
        }
    }

    /// Fold one iteration of input into the scene
    ///
    /// Returns true when something visible changed.
    pub fn apply(&mut self, input: &InputSnapshot) -> bool {
        let (dx, dy) = input.joystick;
        let mut changed = self.move_by(dx, dy);

        if input.primary_pressed {
            self.toggle_mood();
            changed = true;
        }
        let touch_step = self.touch_step(input.touch.is_some());
        if input.secondary_pressed || touch_step {
            self.next_color();
            changed = true;
        }
        changed
    }

    /// Record the current placement as drawn
    pub fn commit(&mut self) {
        self.previous = Some(self.placement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TouchPoint;

    fn scene() -> Scene {
        Scene::new(&SceneConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let scene = scene();
        assert_eq!(scene.placement(), Placement::new(50, 130));
        assert_eq!(scene.previous(), None);
        assert_eq!(scene.mood(), Mood::Happy);
        assert_eq!(scene.color(), Rgb565::YELLOW);
    }

    #[test]
    fn test_move_right() {
        let mut scene = scene();
        let input = InputSnapshot {
            joystick: (10, 0),
            ..Default::default()
        };
        assert!(scene.apply(&input));
        assert_eq!(scene.placement(), Placement::new(60, 130));
    }

    #[test]
    fn test_clamped_at_right_edge() {
        let mut scene = scene();
        let input = InputSnapshot {
            joystick: (10, 0),
            ..Default::default()
        };
        for _ in 0..10 {
            scene.apply(&input);
        }
        // 320 - 220
        assert_eq!(scene.placement(), Placement::new(100, 130));
        assert!(!scene.apply(&input));
    }

    #[test]
    fn test_clamped_at_origin() {
        let mut scene = scene();
        scene.move_by(i16::MIN, i16::MIN);
        assert_eq!(scene.placement(), Placement::new(0, 0));
        scene.move_by(i16::MAX, i16::MAX);
        assert_eq!(scene.placement(), Placement::new(100, 260));
    }

    #[test]
    fn test_start_pulled_onto_panel() {
        let scene = Scene::new(&SceneConfig {
            start: Placement::new(300, 400),
            ..Default::default()
        });
        assert_eq!(scene.placement(), Placement::new(100, 260));
    }

    #[test]
    fn test_buttons() {
        let mut scene = scene();
        assert!(scene.apply(&InputSnapshot {
            primary_pressed: true,
            ..Default::default()
        }));
        assert_eq!(scene.mood(), Mood::Sad);
        assert_eq!(scene.placement(), Placement::new(50, 130));

        assert!(scene.apply(&InputSnapshot {
            secondary_pressed: true,
            ..Default::default()
        }));
        assert_eq!(scene.color(), Rgb565::CYAN);

        assert!(scene.apply(&InputSnapshot {
            touch: Some(TouchPoint { x: 10, y: 10 }),
            ..Default::default()
        }));
        assert_eq!(scene.color(), Rgb565::MAGENTA);

        assert!(!scene.apply(&InputSnapshot::default()));
    }

    #[test]
    fn test_palette_wraps() {
        let mut scene = scene();
        for _ in 0..PALETTE.len() {
            scene.next_color();
        }
        assert_eq!(scene.color_index(), 0);
        assert_eq!(palette(8), Rgb565::CYAN);
    }

    #[test]
    fn test_commit_records_placement() {
        let mut scene = scene();
        scene.commit();
        assert_eq!(scene.previous(), Some(Placement::new(50, 130)));

        scene.move_by(5, 0);
        assert_eq!(scene.previous(), Some(Placement::new(50, 130)));
        assert_eq!(scene.placement(), Placement::new(55, 130));

        scene.commit();
        assert_eq!(scene.previous(), Some(Placement::new(55, 130)));
    }

    fn touched() -> InputSnapshot {
        InputSnapshot {
            touch: Some(TouchPoint { x: 160, y: 240 }),
            ..Default::default()
        }
    }

    #[test]
    fn test_held_touch_cycles_at_repeat_rate() {
        let mut scene = scene();
        let mut steps = 0;
        for _ in 0..50 {
            let before = scene.color_index();
            scene.apply(&touched());
            if scene.color_index() != before {
                steps += 1;
            }
        }
        // First touched iteration, then every 10th
        assert_eq!(steps, 5);
    }

    #[test]
    fn test_touch_release_rearms() {
        let mut scene = scene();
        assert!(scene.apply(&touched()));
        assert!(!scene.apply(&touched()));
        assert!(!scene.apply(&InputSnapshot::default()));

        // A fresh touch steps immediately
        assert!(scene.apply(&touched()));
        assert_eq!(scene.color(), Rgb565::MAGENTA);
    }

    #[test]
    fn test_touch_repeat_of_one_steps_every_iteration() {
        let mut scene = Scene::new(&SceneConfig {
            touch_repeat: 0,
            ..Default::default()
        });
        for _ in 0..3 {
            assert!(scene.apply(&touched()));
        }
        assert_eq!(scene.color(), Rgb565::GREEN);
    }
}
