pub mod backdrop;
pub mod card;
pub mod celebration;
pub mod cues;
pub mod no_button;
pub mod overlay;
pub mod plugin;
pub mod pointer;
pub mod pose;
pub mod utils;

use bevy::prelude::*;

use crate::evasion::{Point, TargetBox};

/// Draw order, back to front
pub mod layer {
    pub const BACKDROP: f32 = 0.0;
    pub const CARD: f32 = 10.0;
    pub const CELEBRATION: f32 = 20.0;
    pub const CONFETTI: f32 = 30.0;
    pub const NO_BUTTON: f32 = 50.0;
    pub const CONTROLS: f32 = 60.0;
    pub const BANNER: f32 = 80.0;
    pub const CURTAIN: f32 = 100.0;
}

/// Everything that belongs to the asking screen; despawned on accept
#[derive(Component)]
pub struct AskingScreen;

/// Clickable area centered on the entity's translation, in logical pixels
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox {
    pub size: Vec2,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Is the viewport point inside this box when its center sits at `center`?
    pub fn contains(&self, center: Point, p: Point) -> bool {
        TargetBox::new(
            center.x - self.size.x * 0.5,
            center.y - self.size.y * 0.5,
            self.size.x,
            self.size.y,
        )
        .contains(p)
    }
}
