// decor/sky.rs

use super::easing::{keyframes, loop_progress};
use super::Frame;
use crate::evasion::ViewportBounds;
use crate::game::Mode;
use rand::Rng;

const TWINKLE_SECS: f32 = 4.0;
const SHOOTING_STAR_SECS: f32 = 12.0;

/// A twinkling dot at a fixed spot
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkle {
    pub id: usize,
    /// Percent of viewport width
    pub left: f32,
    /// Percent of viewport height
    pub top: f32,
    pub delay: f32,
    /// Diameter in pixels
    pub size: f32,
}

/// A paper lantern drifting up from below the screen
#[derive(Debug, Clone, PartialEq)]
pub struct Lantern {
    pub id: usize,
    pub left: f32,
    pub delay: f32,
    pub duration: f32,
    /// Width in pixels; height is 1.4x
    pub size: f32,
}

/// A streak crossing the sky diagonally on a fixed cadence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingStar {
    /// Percent of viewport height
    pub top: f32,
    pub delay: f32,
}

pub const SHOOTING_STARS: [ShootingStar; 3] = [
    ShootingStar { top: 5.0, delay: 0.0 },
    ShootingStar { top: 35.0, delay: 4.0 },
    ShootingStar { top: 65.0, delay: 8.0 },
];

pub fn generate_sparkles(rng: &mut impl Rng, mode: Mode) -> Vec<Sparkle> {
    let (count, base, span) = match mode {
        Mode::Sweet => (40, 1.0, 3.0),
        Mode::Magic => (80, 2.0, 5.0),
    };

    (0..count)
        .map(|id| Sparkle {
            id,
            left: rng.random_range(0.0..100.0),
            top: rng.random_range(0.0..100.0),
            delay: rng.random_range(0.0..5.0),
            size: base + rng.random_range(0.0..span),
        })
        .collect()
}

pub fn generate_lanterns(rng: &mut impl Rng, mode: Mode) -> Vec<Lantern> {
    let (count, max_delay, base_duration, base_size) = match mode {
        Mode::Sweet => (8, 20.0, 25.0, 15.0),
        Mode::Magic => (15, 10.0, 15.0, 20.0),
    };

    (0..count)
        .map(|id| Lantern {
            id,
            left: rng.random_range(0.0..100.0),
            delay: rng.random_range(0.0..max_delay),
            duration: base_duration + rng.random_range(0.0..15.0),
            size: base_size + rng.random_range(0.0..10.0),
        })
        .collect()
}

impl Sparkle {
    pub fn sample(&self, time: f32, viewport: ViewportBounds) -> Frame {
        let t = loop_progress(time, self.delay, TWINKLE_SECS);
        // 0 -> 1 -> 0 over one cycle, eased like ease-in-out
        let pulse = 0.5 - 0.5 * (t * std::f32::consts::TAU).cos();

        Frame {
            x: self.left / 100.0 * viewport.width,
            y: self.top / 100.0 * viewport.height,
            scale: 1.0 + 0.5 * pulse,
            rotation_deg: 0.0,
            opacity: 0.1 + 0.7 * pulse,
        }
    }
}

impl Lantern {
    pub fn sample(&self, time: f32, viewport: ViewportBounds) -> Frame {
        let left = self.left / 100.0 * viewport.width;
        if time < self.delay {
            return Frame::hidden(left, viewport.height * 1.1);
        }

        let t = loop_progress(time, self.delay, self.duration);
        Frame {
            x: left + 20.0 * t,
            y: viewport.height * (1.1 - 1.3 * t),
            scale: 1.0,
            rotation_deg: 0.0,
            opacity: keyframes(&[(0.0, 0.0), (0.1, 1.0), (0.9, 1.0), (1.0, 0.0)], t),
        }
    }
}

impl ShootingStar {
    /// The streak only travels during the first 15% of its cycle
    pub fn sample(&self, time: f32, viewport: ViewportBounds) -> Frame {
        let t = loop_progress(time, self.delay, SHOOTING_STAR_SECS);
        let travel = (t / 0.15).min(1.0);

        Frame {
            x: viewport.width * 1.15 - 600.0 * travel,
            y: self.top / 100.0 * viewport.height + 600.0 * travel,
            scale: keyframes(&[(0.0, 0.0), (0.05, 1.0), (0.15, 1.0), (1.0, 0.0)], t),
            rotation_deg: -45.0,
            opacity: keyframes(&[(0.0, 0.0), (0.05, 1.0), (0.15, 0.0)], t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const VIEWPORT: ViewportBounds = ViewportBounds::new(1000.0, 800.0);

    #[test]
    fn test_sparkle_counts_and_ranges() {
        let mut rng = StdRng::seed_from_u64(1);

        let sweet = generate_sparkles(&mut rng, Mode::Sweet);
        assert_eq!(sweet.len(), 40);
        assert!(sweet.iter().all(|s| (1.0..4.0).contains(&s.size)));

        let magic = generate_sparkles(&mut rng, Mode::Magic);
        assert_eq!(magic.len(), 80);
        assert!(magic.iter().all(|s| (2.0..7.0).contains(&s.size)));
        assert!(magic.iter().all(|s| (0.0..100.0).contains(&s.left) && (0.0..5.0).contains(&s.delay)));
    }

    #[test]
    fn test_lantern_counts_and_ranges() {
        let mut rng = StdRng::seed_from_u64(2);

        let sweet = generate_lanterns(&mut rng, Mode::Sweet);
        assert_eq!(sweet.len(), 8);
        assert!(sweet.iter().all(|l| (25.0..40.0).contains(&l.duration) && l.delay < 20.0));

        let magic = generate_lanterns(&mut rng, Mode::Magic);
        assert_eq!(magic.len(), 15);
        assert!(magic.iter().all(|l| (15.0..30.0).contains(&l.duration) && (20.0..30.0).contains(&l.size)));
    }

    #[test]
    fn test_same_seed_same_sky() {
        let a = generate_lanterns(&mut StdRng::seed_from_u64(9), Mode::Sweet);
        let b = generate_lanterns(&mut StdRng::seed_from_u64(9), Mode::Sweet);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sparkle_twinkles_between_bounds() {
        let sparkle = Sparkle {
            id: 0,
            left: 50.0,
            top: 25.0,
            delay: 0.0,
            size: 2.0,
        };

        let dim = sparkle.sample(0.0, VIEWPORT);
        assert!((dim.opacity - 0.1).abs() < 1e-5);
        assert_eq!((dim.x, dim.y), (500.0, 200.0));

        let bright = sparkle.sample(2.0, VIEWPORT);
        assert!((bright.opacity - 0.8).abs() < 1e-5);
        assert!((bright.scale - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_lantern_hidden_before_delay_then_rises() {
        let lantern = Lantern {
            id: 0,
            left: 10.0,
            delay: 5.0,
            duration: 20.0,
            size: 15.0,
        };

        assert_eq!(lantern.sample(1.0, VIEWPORT).opacity, 0.0);

        let early = lantern.sample(7.0, VIEWPORT);
        let later = lantern.sample(15.0, VIEWPORT);
        assert!(later.y < early.y);
        assert!(later.opacity > 0.0);
    }
}
