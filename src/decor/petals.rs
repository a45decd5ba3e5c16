// decor/petals.rs

use super::easing::{CubicBezier, keyframes, loop_progress};
use super::Frame;
use crate::evasion::ViewportBounds;
use crate::game::Mode;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetalKind {
    Sakura,
    Heart,
    Leaf,
}

const KINDS: [PetalKind; 3] = [PetalKind::Sakura, PetalKind::Heart, PetalKind::Leaf];

const FALL_CURVES: [CubicBezier; 5] = [
    CubicBezier::EASE,
    CubicBezier::EASE_IN,
    CubicBezier::EASE_OUT,
    CubicBezier::SINE_IN_OUT,
    CubicBezier::EASE_IN_OUT,
];

/// One falling petal. Every field is fixed at generation time; motion is a
/// pure function of the clock (see [`Petal::sample`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Petal {
    pub id: usize,
    /// Percent of viewport width; spills 10% past both edges
    pub left: f32,
    /// Negative, so the rain is already under way on the first frame
    pub delay: f32,
    pub duration: f32,
    pub size: f32,
    pub rotation: f32,
    /// Horizontal travel by the time it leaves the bottom, in pixels
    pub drift: f32,
    /// Horizontal offset at the halfway point
    pub mid_drift: f32,
    pub sway_speed: f32,
    pub sway_amount: f32,
    pub sway_delay: f32,
    pub opacity: f32,
    pub flip_speed: f32,
    pub flip_reversed: bool,
    pub kind: PetalKind,
    pub color_index: usize,
    pub fall_curve: CubicBezier,
}

pub fn generate_petals(rng: &mut impl Rng, mode: Mode) -> Vec<Petal> {
    // (count, drift span, base duration, duration span, size span, base opacity)
    let (count, drift_span, base_duration, duration_span, size_span, base_opacity) = match mode {
        Mode::Sweet => (80, 700.0, 12.0, 20.0, 20.0, 0.3),
        Mode::Magic => (180, 1000.0, 5.0, 8.0, 30.0, 0.6),
    };

    (0..count)
        .map(|id| {
            let drift = (rng.random::<f32>() - 0.5) * drift_span;
            Petal {
                id,
                left: rng.random_range(0.0..120.0) - 10.0,
                delay: -rng.random_range(0.0..45.0),
                duration: base_duration + rng.random_range(0.0..duration_span),
                size: 6.0 + rng.random_range(0.0..size_span),
                rotation: rng.random_range(0.0..360.0),
                drift,
                mid_drift: drift * (0.3 + rng.random_range(0.0..0.4)),
                sway_speed: 2.0 + rng.random_range(0.0..4.0),
                sway_amount: 20.0 + rng.random_range(0.0..50.0),
                sway_delay: -rng.random_range(0.0..5.0),
                opacity: base_opacity + rng.random_range(0.0..0.4),
                flip_speed: 1.5 + rng.random_range(0.0..6.0),
                flip_reversed: rng.random_bool(0.5),
                kind: KINDS[rng.random_range(0..KINDS.len())],
                color_index: rng.random_range(0..3),
                fall_curve: FALL_CURVES[rng.random_range(0..FALL_CURVES.len())],
            }
        })
        .collect()
}

impl Petal {
    pub fn sample(&self, time: f32, viewport: ViewportBounds) -> Frame {
        let t = loop_progress(time, self.delay, self.duration);
        let fall = self.fall_curve.apply(t);

        // Side-to-side pendulum on its own clock
        let sway_phase = loop_progress(time, self.sway_delay, self.sway_speed);
        let sway = -(sway_phase * std::f32::consts::TAU).cos() * self.sway_amount;
        let sway_tilt = -(sway_phase * std::f32::consts::TAU).cos() * 10.0;

        let drift = keyframes(&[(0.0, 0.0), (0.5, self.mid_drift), (1.0, self.drift)], fall);

        let tumble = loop_progress(time, 0.0, self.flip_speed) * 360.0;
        let spin = if self.flip_reversed { -tumble } else { tumble };

        Frame {
            x: self.left / 100.0 * viewport.width + drift + sway,
            y: viewport.height * (-0.1 + 1.2 * fall),
            scale: if self.kind == PetalKind::Heart { 0.6 } else { 1.0 },
            rotation_deg: self.rotation + self.rotation * 0.5 * fall + spin + sway_tilt,
            opacity: self.opacity * keyframes(&[(0.0, 0.0), (0.1, 1.0), (0.9, 1.0), (1.0, 0.0)], t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_petal_counts_per_mode() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_petals(&mut rng, Mode::Sweet).len(), 80);
        assert_eq!(generate_petals(&mut rng, Mode::Magic).len(), 180);
    }

    #[test]
    fn test_sweet_petal_ranges() {
        let mut rng = StdRng::seed_from_u64(2);
        for p in generate_petals(&mut rng, Mode::Sweet) {
            assert!((-10.0..110.0).contains(&p.left));
            assert!(p.delay <= 0.0 && p.delay > -45.0);
            assert!((12.0..32.0).contains(&p.duration));
            assert!((6.0..26.0).contains(&p.size));
            assert!(p.drift.abs() <= 350.0);
            assert!(p.mid_drift.abs() <= p.drift.abs());
            assert!((0.3..0.7).contains(&p.opacity));
            assert!(p.color_index < 3);
        }
    }

    #[test]
    fn test_magic_petals_fall_faster_and_brighter() {
        let mut rng = StdRng::seed_from_u64(3);
        for p in generate_petals(&mut rng, Mode::Magic) {
            assert!((5.0..13.0).contains(&p.duration));
            assert!((0.6..1.0).contains(&p.opacity));
            assert!(p.drift.abs() <= 500.0);
        }
    }

    #[test]
    fn test_petal_falls_top_to_bottom() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut petal = generate_petals(&mut rng, Mode::Sweet).remove(0);
        petal.delay = 0.0;
        let viewport = ViewportBounds::new(1000.0, 1000.0);

        let start = petal.sample(0.0, viewport);
        let middle = petal.sample(petal.duration * 0.5, viewport);

        assert!((start.y + 100.0).abs() < 1e-3);
        assert_eq!(start.opacity, 0.0);
        assert!(middle.y > start.y);
        assert!(middle.opacity > 0.0);
    }
}
