// decor/easing.rs

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        CubicBezier { x1, y1, x2, y2 }
    }

    pub const EASE: CubicBezier = CubicBezier::new(0.25, 0.1, 0.25, 1.0);
    pub const EASE_IN: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);
    pub const SINE_IN_OUT: CubicBezier = CubicBezier::new(0.37, 0.0, 0.63, 1.0);

    /// Confetti burst from the middle of the screen
    pub const BURST: CubicBezier = CubicBezier::new(0.1, 0.9, 0.2, 1.0);
    /// Corner cannons
    pub const CANNON: CubicBezier = CubicBezier::new(0.1, 0.8, 0.3, 1.0);
    /// Back-out overshoot used by the NO button spring
    pub const SPRING: CubicBezier = CubicBezier::new(0.175, 0.885, 0.32, 1.275);

    fn sample_x(&self, s: f32) -> f32 {
        bezier_1d(self.x1, self.x2, s)
    }

    fn sample_y(&self, s: f32) -> f32 {
        bezier_1d(self.y1, self.y2, s)
    }

    fn slope_x(&self, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * self.x1 + 6.0 * inv * s * (self.x2 - self.x1) + 3.0 * s * s * (1.0 - self.x2)
    }

    /// Map linear progress `t` in `[0, 1]` to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        // Newton first, bisection if the slope flattens out
        let mut s = t;
        for _ in 0..8 {
            let err = self.sample_x(s) - t;
            if err.abs() < 1e-5 {
                return self.sample_y(s);
            }
            let slope = self.slope_x(s);
            if slope.abs() < 1e-6 {
                break;
            }
            s = (s - err / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..30 {
            let x = self.sample_x(s);
            if (x - t).abs() < 1e-5 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        self.sample_y(s)
    }
}

fn bezier_1d(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Piecewise-linear keyframe track: `(offset, value)` pairs sorted by offset
pub fn keyframes(track: &[(f32, f32)], t: f32) -> f32 {
    let Some(&(first_t, first_v)) = track.first() else {
        return 0.0;
    };
    if t <= first_t {
        return first_v;
    }
    for pair in track.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            let span = (t1 - t0).max(f32::EPSILON);
            return v0 + (v1 - v0) * (t - t0) / span;
        }
    }
    track.last().map_or(first_v, |&(_, v)| v)
}

/// Fraction of the way through a looping animation that started at `delay`
pub fn loop_progress(time: f32, delay: f32, duration: f32) -> f32 {
    ((time - delay) / duration.max(f32::EPSILON)).rem_euclid(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_fixed() {
        for curve in [CubicBezier::EASE, CubicBezier::BURST, CubicBezier::EASE_IN_OUT] {
            assert_eq!(curve.apply(0.0), 0.0);
            assert_eq!(curve.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_linear_curve_is_identity() {
        let linear = CubicBezier::new(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!((linear.apply(t) - t).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = CubicBezier::EASE_IN_OUT;
        assert!((curve.apply(0.5) - 0.5).abs() < 1e-3);
        assert!((curve.apply(0.25) + curve.apply(0.75) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_burst_front_loads_motion() {
        assert!(CubicBezier::BURST.apply(0.2) > 0.6);
    }

    #[test]
    fn test_spring_overshoots() {
        let peak = (1..10)
            .map(|i| CubicBezier::SPRING.apply(i as f32 / 10.0))
            .fold(0.0_f32, f32::max);
        assert!(peak > 1.0);
        assert_eq!(CubicBezier::SPRING.apply(1.0), 1.0);
    }

    #[test]
    fn test_keyframes_interpolate() {
        let track = [(0.0, 1.0), (0.2, 1.4), (0.5, 0.8), (1.0, 1.0)];
        assert_eq!(keyframes(&track, -1.0), 1.0);
        assert!((keyframes(&track, 0.1) - 1.2).abs() < 1e-6);
        assert!((keyframes(&track, 0.35) - 1.1).abs() < 1e-6);
        assert_eq!(keyframes(&track, 2.0), 1.0);
        assert_eq!(keyframes(&[], 0.5), 0.0);
    }

    #[test]
    fn test_loop_progress_handles_negative_delay() {
        assert!((loop_progress(0.0, -3.0, 12.0) - 0.25).abs() < 1e-6);
        assert!((loop_progress(13.0, 1.0, 12.0) - 0.0).abs() < 1e-6);
    }
}
