/// Engine configuration: fallback strictness and the presentation palette.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::axis::Tone;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid color '{value}' for {tone:?}: expected #rgb or #rrggbb")]
    InvalidColor { tone: Tone, value: String },
}

/// How unrecognized axis values are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackPolicy {
    /// Substitute the default and log a warning.
    Lenient,
    /// Reject the request.
    Strict,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self::Lenient
    }
}

/// Colors applied to offers and calls-to-action by tone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub base: String,
    pub accent: String,
    pub urgent: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base: "#667eea".to_string(),
            accent: "#ff6b9d".to_string(),
            urgent: "#ff3366".to_string(),
        }
    }
}

impl Palette {
    pub fn color(&self, tone: Tone) -> &str {
        match tone {
            Tone::Base => &self.base,
            Tone::Accent => &self.accent,
            Tone::Urgent => &self.urgent,
        }
    }

    /// Colors end up inside style attributes, so only hex notation is accepted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tone in [Tone::Base, Tone::Accent, Tone::Urgent] {
            let value = self.color(tone);
            if !is_hex_color(value) {
                return Err(ConfigError::InvalidColor {
                    tone,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fallback: FallbackPolicy,
    pub palette: Palette,
}

impl EngineConfig {
    /// Load a configuration from a RON file. Missing fields take defaults.
    pub fn load_from_ron(path: &Path) -> Result<EngineConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<EngineConfig, ConfigError> {
        let config: EngineConfig = ron::from_str(input)?;
        config.palette.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.fallback, FallbackPolicy::Lenient);
        assert_eq!(config.palette.color(Tone::Base), "#667eea");
        assert_eq!(config.palette.color(Tone::Accent), "#ff6b9d");
        assert_eq!(config.palette.color(Tone::Urgent), "#ff3366");
    }

    #[test]
    fn parse_partial_config() {
        let config = EngineConfig::parse_ron("(fallback: strict)").unwrap();
        assert_eq!(config.fallback, FallbackPolicy::Strict);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn parse_palette_override() {
        let config = EngineConfig::parse_ron("(palette: (urgent: \"#c00\"))").unwrap();
        assert_eq!(config.palette.urgent, "#c00");
        assert_eq!(config.palette.base, "#667eea");
    }

    #[test]
    fn reject_non_hex_color() {
        let err = EngineConfig::parse_ron("(palette: (base: \"red; display: none\"))").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { tone: Tone::Base, .. }));
    }

    #[test]
    fn hex_color_shapes() {
        assert!(is_hex_color("#abc"));
        assert!(is_hex_color("#A1B2C3"));
        assert!(!is_hex_color("abc"));
        assert!(!is_hex_color("#abcd"));
        assert!(!is_hex_color("#ggg"));
    }

    #[test]
    fn load_fixture() {
        let path = std::path::PathBuf::from("tests/fixtures/strict_config.ron");
        let config = EngineConfig::load_from_ron(&path).unwrap();
        assert_eq!(config.fallback, FallbackPolicy::Strict);
    }
}
