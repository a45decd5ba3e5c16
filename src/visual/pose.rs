//! Looping cosmetic poses for the NO button.
//!
//! All offsets are viewport pixels (y down) and degrees clockwise, layered on
//! top of the controller's anchor and tilt.

use crate::decor::easing::{CubicBezier, keyframes, loop_progress};
use crate::evasion::CosmeticAnimation;

const SHIVER_SECS: f32 = 0.15;
const FLOAT_SECS: f32 = 3.0;

/// Spring keyframe offsets and the matching scale / tilt multipliers
const SPRING_TIMES: [f32; 5] = [0.0, 0.2, 0.5, 0.8, 1.0];
const SPRING_SCALE: [f32; 5] = [1.0, 1.4, 0.8, 1.1, 1.0];
const SPRING_TILT: [f32; 5] = [1.0, 1.5, 0.8, 1.1, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub dx: f32,
    pub dy: f32,
    /// Total tilt, base included
    pub rotation_deg: f32,
    pub scale: f32,
}

impl Pose {
    pub fn rest(rotation_deg: f32) -> Self {
        Pose {
            dx: 0.0,
            dy: 0.0,
            rotation_deg,
            scale: 1.0,
        }
    }
}

/// Pose for the given animation.
///
/// `clock` drives the looping animations, `bounce_elapsed` the one-shot
/// spring (seconds since the jump, out of `bounce_secs`).
pub fn pose(
    animation: CosmeticAnimation,
    base_rotation: f32,
    clock: f32,
    bounce_elapsed: Option<f32>,
    bounce_secs: f32,
) -> Pose {
    match animation {
        CosmeticAnimation::Jump => {
            let t = bounce_elapsed.unwrap_or(bounce_secs) / bounce_secs.max(f32::EPSILON);
            spring(base_rotation, t)
        }
        CosmeticAnimation::Nervous => shiver(base_rotation, clock),
        CosmeticAnimation::Idle => float(base_rotation, clock),
    }
}

/// Overshooting scale pulse; the timing curve restarts in every segment
pub fn spring(base_rotation: f32, t: f32) -> Pose {
    let t = t.clamp(0.0, 1.0);
    let segment = SPRING_TIMES
        .windows(2)
        .position(|w| t <= w[1])
        .unwrap_or(SPRING_TIMES.len() - 2);

    let (t0, t1) = (SPRING_TIMES[segment], SPRING_TIMES[segment + 1]);
    let local = CubicBezier::SPRING.apply((t - t0) / (t1 - t0));
    let lerp = |track: &[f32; 5]| track[segment] + (track[segment + 1] - track[segment]) * local;

    Pose {
        dx: 0.0,
        dy: 0.0,
        rotation_deg: base_rotation * lerp(&SPRING_TILT),
        scale: lerp(&SPRING_SCALE),
    }
}

/// Fast jitter: two pixels up-right, then two down-left
pub fn shiver(base_rotation: f32, clock: f32) -> Pose {
    let t = loop_progress(clock, 0.0, SHIVER_SECS);
    let track = [(0.0, 0.0), (0.25, 1.0), (0.75, -1.0), (1.0, 0.0)];
    let k = keyframes(&track, t);

    Pose {
        dx: 2.0 * k,
        dy: -2.0 * k,
        rotation_deg: base_rotation + k,
        scale: 1.0,
    }
}

/// Slow bob: ten pixels up with a slight lean at the top
pub fn float(base_rotation: f32, clock: f32) -> Pose {
    let t = loop_progress(clock, 0.0, FLOAT_SECS);
    let half = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
    let k = CubicBezier::EASE_IN_OUT.apply(half);

    Pose {
        dx: 0.0,
        dy: -10.0 * k,
        rotation_deg: base_rotation + 2.0 * k,
        scale: 1.0,
    }
}

/// How far (as a fraction of its own height) a bouncing element is lifted.
///
/// One-second loop: starts lifted a quarter of its height, drops accelerating
/// to rest at the halfway point, then rises decelerating.
pub fn bounce_lift(clock: f32) -> f32 {
    const DROP: CubicBezier = CubicBezier::new(0.8, 0.0, 1.0, 1.0);
    const RISE: CubicBezier = CubicBezier::new(0.0, 0.0, 0.2, 1.0);

    let t = loop_progress(clock, 0.0, 1.0);
    if t < 0.5 {
        0.25 * (1.0 - DROP.apply(t * 2.0))
    } else {
        0.25 * RISE.apply((t - 0.5) * 2.0)
    }
}

/// Opacity of a slow 2 s pulse between 1.0 and 0.5
pub fn pulse(clock: f32, delay: f32) -> f32 {
    let t = loop_progress(clock, delay, 2.0);
    let dip = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
    1.0 - 0.5 * CubicBezier::new(0.4, 0.0, 0.6, 1.0).apply(dip)
}
