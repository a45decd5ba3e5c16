// game/config.rs

use crate::evasion::EvasionTuning;
use bevy::prelude::Resource;
use serde::Deserialize;
use std::fmt;

const PROPOSAL_JSON: &str = include_str!("../../assets/proposal.json");

/// Why the embedded tuning could not be used
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "proposal.json is not valid JSON: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "proposal.json has an invalid value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Delays of the fire-and-forget cosmetic timers, in seconds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub magic_message_secs: f32,
    pub title_bounce_secs: f32,
    pub ending_delay_secs: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            magic_message_secs: 4.0,
            title_bounce_secs: 0.5,
            ending_delay_secs: 2.0,
        }
    }
}

/// Music fade-in ramp and one-shot effect volumes (linear, 0..1)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_step: f32,
    pub music_step_secs: f32,
    pub music_target: f32,
    pub chime_volume: f32,
    pub celebration_volume: f32,
    pub hover_volume: f32,
    pub magic_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            music_step: 0.05,
            music_step_secs: 0.2,
            music_target: 0.3,
            chime_volume: 0.6,
            celebration_volume: 0.5,
            hover_volume: 0.15,
            magic_volume: 0.4,
        }
    }
}

/// Everything tweakable about the proposal, loaded once at startup
#[derive(Debug, Clone, PartialEq, Deserialize, Resource)]
#[serde(default)]
pub struct ProposalConfig {
    pub evasion: EvasionTuning,
    /// Title taps needed to unlock magic mode
    pub magic_tap_goal: u32,
    pub timing: TimingConfig,
    pub audio: AudioConfig,
}

impl Default for ProposalConfig {
    fn default() -> Self {
        ProposalConfig {
            evasion: EvasionTuning::default(),
            magic_tap_goal: 5,
            timing: TimingConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl ProposalConfig {
    /// Parse the configuration shipped inside the binary
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(PROPOSAL_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ProposalConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.evasion.validate().map_err(ConfigError::Invalid)?;
        if self.magic_tap_goal == 0 {
            return Err(ConfigError::Invalid("magic_tap_goal must be at least 1".to_string()));
        }
        let timing = &self.timing;
        if timing.magic_message_secs < 0.0 || timing.title_bounce_secs < 0.0 || timing.ending_delay_secs < 0.0 {
            return Err(ConfigError::Invalid("timer delays must not be negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = ProposalConfig::load().expect("embedded proposal.json parses");
        assert_eq!(config.evasion, EvasionTuning::default());
        assert_eq!(config.magic_tap_goal, 5);
        assert_eq!(config.timing, TimingConfig::default());
        assert_eq!(config.audio, AudioConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = ProposalConfig::from_json(r#"{ "evasion": { "padding": 40.0 } }"#).unwrap();
        assert_eq!(config.evasion.padding, 40.0);
        assert_eq!(config.evasion.flee_radius, 180.0);
        assert_eq!(config.magic_tap_goal, 5);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(ProposalConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_rejects_inverted_radii() {
        let result = ProposalConfig::from_json(
            r#"{ "evasion": { "flee_radius": 400.0, "nervous_radius": 300.0 } }"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_zero_tap_goal() {
        let result = ProposalConfig::from_json(r#"{ "magic_tap_goal": 0 }"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
