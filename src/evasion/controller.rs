// evasion/controller.rs

use super::geometry::{Point, Size, TargetBox, ViewportBounds, clamp_axis};
use super::tuning::EvasionTuning;
use rand::Rng;

/// How close the pointer is to the target, derived fresh from every sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProximityZone {
    #[default]
    Idle,
    Nervous,
    Fleeing,
}

/// Which looping animation the presentation layer should play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CosmeticAnimation {
    /// Slow float up and down
    #[default]
    Idle,
    /// Fast jitter while the pointer lurks nearby
    Nervous,
    /// Spring overshoot right after a jump
    Jump,
}

/// Classify a pointer distance. No hysteresis: the same distance always
/// lands in the same zone.
pub fn classify(distance: f32, tuning: &EvasionTuning) -> ProximityZone {
    if distance < tuning.flee_radius {
        ProximityZone::Fleeing
    } else if distance < tuning.nervous_radius {
        ProximityZone::Nervous
    } else {
        ProximityZone::Idle
    }
}

/// A completed relocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jump {
    /// Anchor before the jump
    pub from: Point,
    /// Anchor after clamping
    pub to: Point,
    /// Fresh tilt in degrees
    pub rotation_deg: f32,
    /// Pointer to target-center distance before the jump
    pub distance_before: f32,
    /// Pointer to target-center distance after the jump
    pub distance_after: f32,
}

/// What a pointer sample did to the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    /// Geometry not measured yet; nothing moved
    Ignored,
    Idle,
    Nervous,
    Jumped(Jump),
}

/// State of the button that refuses to be clicked.
///
/// Owns everything the presentation layer needs to draw it (anchor, tilt,
/// animation selector, readiness) and is only mutated through
/// [`EvasiveTarget::on_pointer_move`], [`EvasiveTarget::initialize`] and
/// [`EvasiveTarget::tick`].
#[derive(Debug, Clone)]
pub struct EvasiveTarget {
    tuning: EvasionTuning,
    /// Top-left anchor in viewport space
    position: Point,
    rotation_deg: f32,
    zone: ProximityZone,
    initialized: bool,
    /// Seconds left in the post-jump spring window
    bounce_remaining: f32,
}

impl EvasiveTarget {
    pub fn new(tuning: EvasionTuning) -> Self {
        EvasiveTarget {
            tuning,
            position: Point::default(),
            rotation_deg: 0.0,
            zone: ProximityZone::Idle,
            initialized: false,
            bounce_remaining: 0.0,
        }
    }

    // === Query Methods ===

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_shivering(&self) -> bool {
        self.zone == ProximityZone::Nervous
    }

    pub fn is_bouncing(&self) -> bool {
        self.bounce_remaining > 0.0
    }

    /// Seconds elapsed since the current spring started, if one is playing
    pub fn bounce_elapsed(&self) -> Option<f32> {
        self.is_bouncing()
            .then(|| self.tuning.bounce_secs - self.bounce_remaining)
    }

    pub fn tuning(&self) -> &EvasionTuning {
        &self.tuning
    }

    /// Spring beats shiver beats float
    pub fn animation(&self) -> CosmeticAnimation {
        if self.is_bouncing() {
            CosmeticAnimation::Jump
        } else if self.is_shivering() {
            CosmeticAnimation::Nervous
        } else {
            CosmeticAnimation::Idle
        }
    }

    // === Mutation Methods ===

    /// Place the target once its geometry is known. Later calls are ignored so
    /// a resize never teleports the button back to its starting spot.
    pub fn initialize(&mut self, viewport: ViewportBounds) -> bool {
        if self.initialized {
            return false;
        }
        let center = viewport.center();
        self.position = Point::new(
            center.x + self.tuning.spawn_offset[0],
            center.y + self.tuning.spawn_offset[1],
        );
        self.initialized = true;
        log::debug!("evasive target placed at {}", self.position);
        true
    }

    /// Feed one pointer sample.
    ///
    /// `measured` is the target's on-screen box right now (it may lag behind
    /// `position` while the presentation layer eases towards it) and
    /// `viewport` the current window size.
    pub fn on_pointer_move(
        &mut self,
        pointer: Point,
        measured: TargetBox,
        viewport: ViewportBounds,
        rng: &mut impl Rng,
    ) -> Reaction {
        if !self.initialized {
            return Reaction::Ignored;
        }

        let center = measured.center();
        let distance = pointer.distance(center);
        self.zone = classify(distance, &self.tuning);

        match self.zone {
            ProximityZone::Idle => Reaction::Idle,
            ProximityZone::Nervous => Reaction::Nervous,
            ProximityZone::Fleeing => Reaction::Jumped(self.jump_away(pointer, measured, viewport, rng)),
        }
    }

    /// Advance the spring window
    pub fn tick(&mut self, delta: f32) {
        if self.bounce_remaining > 0.0 {
            self.bounce_remaining = (self.bounce_remaining - delta).max(0.0);
        }
    }

    fn jump_away(
        &mut self,
        pointer: Point,
        measured: TargetBox,
        viewport: ViewportBounds,
        rng: &mut impl Rng,
    ) -> Jump {
        let tuning = &self.tuning;
        let center = measured.center();
        let size = measured.size();
        let distance_before = pointer.distance(center);

        let angle = pointer.angle_to(center);
        let jump_distance = rng.random_range(tuning.jump_min..=tuning.jump_max);
        let dx = angle.cos() * jump_distance;
        let dy = angle.sin() * jump_distance;

        let anchor_for = |cx: f32, cy: f32| {
            Point::new(
                clamp_axis(cx - size.width / 2.0, size.width, viewport.width, tuning.padding),
                clamp_axis(cy - size.height / 2.0, size.height, viewport.height, tuning.padding),
            )
        };
        let gains = |anchor: Point| pointer.distance(TargetBox::from_anchor(anchor, size).center()) > distance_before;

        let mut to = anchor_for(center.x + dx, center.y + dy);
        if !gains(to) {
            // Pinned against an edge: reflect the escape off it, else take the far corner
            to = [
                anchor_for(center.x - dx, center.y + dy),
                anchor_for(center.x + dx, center.y - dy),
                anchor_for(center.x - dx, center.y - dy),
                farthest_anchor(pointer, size, viewport, tuning.padding),
            ]
            .into_iter()
            .find(|anchor| gains(*anchor))
            .unwrap_or(to);
        }

        let rotation_deg = rng.random_range(-tuning.max_tilt_deg..=tuning.max_tilt_deg);

        let jump = Jump {
            from: self.position,
            to,
            rotation_deg,
            distance_before,
            distance_after: pointer.distance(TargetBox::from_anchor(to, size).center()),
        };

        self.position = to;
        self.rotation_deg = rotation_deg;
        self.bounce_remaining = tuning.bounce_secs;

        log::debug!(
            "evasive target jumped {} -> {} (pointer distance {:.0} -> {:.0})",
            jump.from,
            jump.to,
            jump.distance_before,
            jump.distance_after
        );

        jump
    }
}

/// Anchor of the allowed spot farthest from `pointer`, axis by axis
fn farthest_anchor(pointer: Point, size: Size, viewport: ViewportBounds, padding: f32) -> Point {
    let axis = |p: f32, size: f32, extent: f32| {
        let low = padding;
        let high = (extent - size - padding).max(padding);
        if (low + size / 2.0 - p).abs() >= (high + size / 2.0 - p).abs() {
            low
        } else {
            high
        }
    };
    Point::new(
        axis(pointer.x, size.width, viewport.width),
        axis(pointer.y, size.height, viewport.height),
    )
}
