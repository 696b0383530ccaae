//! Simulator settings

use super::ConfigError;
use crate::types::Level;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SETTINGS_FILE: &str = "settings.toml";

/// Session defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// Level selected at startup
    #[serde(default)]
    pub default_level: Level,
    /// Start with the shield slot in the roster
    #[serde(default)]
    pub shield: bool,
    /// Copy the first weapon stones into the other slots
    #[serde(default = "default_broadcast")]
    pub broadcast_weapon_stones: bool,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        SimulatorSettings {
            default_level: Level::default(),
            shield: false,
            broadcast_weapon_stones: true,
        }
    }
}

fn default_broadcast() -> bool {
    true
}

/// Read `settings.toml` from `dir`; a missing file gives the defaults
pub fn load_settings(dir: &Path) -> Result<SimulatorSettings, ConfigError> {
    let path = dir.join(SETTINGS_FILE);
    if !path.is_file() {
        return Ok(SimulatorSettings::default());
    }
    super::load_toml(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings: SimulatorSettings = parse_toml("shield = true\n").unwrap();
        assert_eq!(settings.default_level, Level::Lv110);
        assert!(settings.shield);
        assert!(settings.broadcast_weapon_stones);
    }

    #[test]
    fn test_parse_settings() {
        let toml = r#"
default_level = "75"
broadcast_weapon_stones = false
"#;
        let settings: SimulatorSettings = parse_toml(toml).unwrap();
        assert_eq!(settings.default_level, Level::Lv75);
        assert!(!settings.shield);
        assert!(!settings.broadcast_weapon_stones);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let result: Result<SimulatorSettings, _> = parse_toml("default_level = \"90\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(load_settings(dir.path()).unwrap(), SimulatorSettings::default());
    }
}
