//! Background and celebration decorations.
//!
//! Everything here is generated up front from an injected RNG and then
//! animated as a pure function of elapsed time, so a seeded generator
//! always produces the same scene and nothing here needs a clock or ECS.

pub mod celebration;
pub mod easing;
pub mod palette;
pub mod petals;
pub mod sky;

pub use celebration::{Confetti, ConfettiShape, Curtain, FloatingHeart, Shimmer, Volley};
pub use palette::Rgb;
pub use petals::{Petal, PetalKind};
pub use sky::{Lantern, SHOOTING_STARS, ShootingStar, Sparkle};

use crate::game::Mode;
use rand::Rng;

/// Where a decoration sits at one instant, in viewport pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
}

impl Frame {
    /// Parked at `(x, y)` and invisible
    pub const fn hidden(x: f32, y: f32) -> Self {
        Frame {
            x,
            y,
            scale: 1.0,
            rotation_deg: 0.0,
            opacity: 0.0,
        }
    }
}

/// The ambient backdrop behind the proposal card
#[derive(Debug, Clone, PartialEq)]
pub struct Decorations {
    pub mode: Mode,
    pub sparkles: Vec<Sparkle>,
    pub lanterns: Vec<Lantern>,
    pub petals: Vec<Petal>,
}

impl Decorations {
    pub fn generate(rng: &mut impl Rng, mode: Mode) -> Self {
        Decorations {
            mode,
            sparkles: sky::generate_sparkles(rng, mode),
            lanterns: sky::generate_lanterns(rng, mode),
            petals: petals::generate_petals(rng, mode),
        }
    }
}

/// Everything that appears once the proposal is accepted
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrationScene {
    pub hearts: Vec<FloatingHeart>,
    pub shimmers: Vec<Shimmer>,
    pub confetti: Vec<Confetti>,
}

impl CelebrationScene {
    pub fn generate(rng: &mut impl Rng) -> Self {
        CelebrationScene {
            hearts: celebration::generate_hearts(rng),
            shimmers: celebration::generate_shimmers(rng),
            confetti: celebration::generate_confetti(rng),
        }
    }
}
