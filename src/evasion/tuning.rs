// evasion/tuning.rs

use serde::Deserialize;

/// Distances (pixels), angles (degrees) and durations (seconds) that shape how
/// the declinable button runs away.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvasionTuning {
    /// Pointer closer than this makes the button jump
    pub flee_radius: f32,
    /// Pointer closer than this (but outside `flee_radius`) makes it shiver
    pub nervous_radius: f32,
    /// Shortest jump, measured center to center
    pub jump_min: f32,
    /// Longest jump
    pub jump_max: f32,
    /// Margin kept between the button and every viewport edge after a jump
    pub padding: f32,
    /// Jumps tilt the button by a random angle in `[-max_tilt, max_tilt]`
    pub max_tilt_deg: f32,
    /// How long the spring animation plays after a jump
    pub bounce_secs: f32,
    /// Initial anchor, relative to the viewport center
    pub spawn_offset: [f32; 2],
}

impl Default for EvasionTuning {
    fn default() -> Self {
        EvasionTuning {
            flee_radius: 180.0,
            nervous_radius: 300.0,
            jump_min: 300.0,
            jump_max: 500.0,
            padding: 100.0,
            max_tilt_deg: 20.0,
            bounce_secs: 0.6,
            spawn_offset: [100.0, 80.0],
        }
    }
}

impl EvasionTuning {
    /// Check the relationships the controller relies on
    pub fn validate(&self) -> Result<(), String> {
        if !(self.flee_radius >= 0.0 && self.flee_radius <= self.nervous_radius) {
            return Err(format!(
                "flee_radius ({}) must be between 0 and nervous_radius ({})",
                self.flee_radius, self.nervous_radius
            ));
        }
        if !(self.jump_min > 0.0 && self.jump_min <= self.jump_max) {
            return Err(format!(
                "jump range {}..={} must be positive and ordered",
                self.jump_min, self.jump_max
            ));
        }
        if self.padding < 0.0 || self.max_tilt_deg < 0.0 || self.bounce_secs < 0.0 {
            return Err("padding, max_tilt_deg and bounce_secs must not be negative".to_string());
        }
        Ok(())
    }
}
