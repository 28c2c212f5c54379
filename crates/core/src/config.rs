//! Tunable simulation parameters.
//! Every field has a default so partial TOML files only need to name what they change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {field}: min {min} exceeds max {max}")]
    InvertedRange { field: &'static str, min: usize, max: usize },
    #[error("invalid role thresholds: treasure {treasure} must not exceed challenge {challenge}")]
    RoleThresholds { treasure: f64, challenge: f64 },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub generator: GeneratorConfig,
    pub combat: CombatConfig,
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.generator.validate()?;
        Ok(config)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub max_rooms: usize,
    pub min_room_width: usize,
    pub max_room_width: usize,
    pub min_room_height: usize,
    pub max_room_height: usize,
    pub room_margin: usize,
    pub placement_attempts: u32,
    pub extra_corridor_chance: f64,
    pub treasure_threshold: f64,
    pub challenge_threshold: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_rooms: 12,
            min_room_width: 4,
            max_room_width: 9,
            min_room_height: 3,
            max_room_height: 6,
            room_margin: 1,
            placement_attempts: 200,
            extra_corridor_chance: 0.1,
            treasure_threshold: 0.15,
            challenge_threshold: 0.25,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_room_width > self.max_room_width {
            return Err(ConfigError::InvertedRange {
                field: "room width",
                min: self.min_room_width,
                max: self.max_room_width,
            });
        }
        if self.min_room_height > self.max_room_height {
            return Err(ConfigError::InvertedRange {
                field: "room height",
                min: self.min_room_height,
                max: self.max_room_height,
            });
        }
        if self.treasure_threshold > self.challenge_threshold {
            return Err(ConfigError::RoleThresholds {
                treasure: self.treasure_threshold,
                challenge: self.challenge_threshold,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Fold active attack/defense status modifiers into actor-level attacks.
    pub apply_status_modifiers: bool,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self { apply_status_modifiers: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = SimConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config = SimConfig::from_toml_str(
            r#"
            [generator]
            max_rooms = 4

            [combat]
            apply_status_modifiers = false
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.generator.max_rooms, 4);
        assert_eq!(config.generator.min_room_width, GeneratorConfig::default().min_room_width);
        assert!(!config.combat.apply_status_modifiers);
    }

    #[test]
    fn inverted_room_range_is_rejected() {
        let err = SimConfig::from_toml_str(
            r#"
            [generator]
            min_room_width = 8
            max_room_width = 5
            "#,
        )
        .expect_err("inverted range must be rejected");
        assert!(matches!(err, ConfigError::InvertedRange { field: "room width", .. }));
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let err = SimConfig::from_toml_str("generator = 3").expect_err("wrong shape must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
