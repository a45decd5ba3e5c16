// game/audio_fade.rs

/// Stepped fade-in for the background music: every `interval` seconds the
/// volume goes up by `step` until it reaches `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct FadeRamp {
    step: f32,
    interval: f32,
    target: f32,
    steps_taken: u32,
    elapsed: f32,
    running: bool,
}

impl FadeRamp {
    pub fn new(step: f32, interval: f32, target: f32) -> Self {
        FadeRamp {
            step: step.max(f32::EPSILON),
            interval: interval.max(f32::EPSILON),
            target: target.max(0.0),
            steps_taken: 0,
            elapsed: 0.0,
            running: false,
        }
    }

    pub fn volume(&self) -> f32 {
        (self.steps_taken as f32 * self.step).min(self.target)
    }

    pub fn is_finished(&self) -> bool {
        self.volume() >= self.target - 1e-4
    }

    /// Start from silence
    pub fn start(&mut self) {
        self.steps_taken = 0;
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Advance by `delta` seconds. Returns the new volume when it changed.
    pub fn advance(&mut self, delta: f32) -> Option<f32> {
        if !self.running {
            return None;
        }

        self.elapsed += delta;
        let mut changed = false;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            if self.is_finished() {
                self.running = false;
                break;
            }
            self.steps_taken += 1;
            changed = true;
        }

        changed.then(|| self.volume())
    }
}

impl Default for FadeRamp {
    fn default() -> Self {
        FadeRamp::new(0.05, 0.2, 0.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_until_started() {
        let mut ramp = FadeRamp::default();
        assert_eq!(ramp.advance(10.0), None);
        assert_eq!(ramp.volume(), 0.0);
    }

    #[test]
    fn test_steps_every_interval() {
        let mut ramp = FadeRamp::default();
        ramp.start();

        assert_eq!(ramp.advance(0.1), None);
        let v = ramp.advance(0.1).expect("first step after 200ms");
        assert!((v - 0.05).abs() < 1e-6);

        let v = ramp.advance(0.4).expect("two more steps");
        assert!((v - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_stops_at_target() {
        let mut ramp = FadeRamp::default();
        ramp.start();

        for _ in 0..50 {
            ramp.advance(0.2);
        }

        assert!((ramp.volume() - 0.3).abs() < 1e-6);
        assert!(ramp.is_finished());
        assert_eq!(ramp.advance(1.0), None);
        assert_eq!(ramp.advance(10.0), None);
    }

    #[test]
    fn test_one_long_frame_never_overshoots() {
        let mut ramp = FadeRamp::default();
        ramp.start();

        let v = ramp.advance(60.0).expect("volume changed");
        assert!(v <= 0.3 + 1e-6);
    }
}
