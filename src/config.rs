use std::fs;
use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::session::plan::{Focus, PlanOptions};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_goal")]
    pub default_goal: String,
    #[serde(default = "default_adjust_durations")]
    pub adjust_durations: bool,
    #[serde(default = "default_annotate_position")]
    pub annotate_position: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_theme() -> String {
    "pitch-night".to_string()
}
fn default_goal() -> String {
    "control".to_string()
}
fn default_adjust_durations() -> bool {
    true
}
fn default_annotate_position() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_goal: default_goal(),
            adjust_durations: default_adjust_durations(),
            annotate_position: default_annotate_position(),
            log_level: default_log_level(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pitchside")
            .join("config.toml")
    }

    /// Reset an unrecognised `default_goal` so a stale file still starts cleanly.
    pub fn normalize(&mut self) {
        if Focus::from_key(&self.default_goal).is_none() {
            self.default_goal = default_goal();
        }
    }

    pub fn focus(&self) -> Focus {
        Focus::from_key(&self.default_goal).unwrap_or_default()
    }

    /// Focus for this run: a `--goal` override if given, else `default_goal`.
    /// The override is never written back into the config.
    pub fn startup_focus(&self, goal_override: Option<&str>) -> Result<Focus> {
        match goal_override {
            None => Ok(self.focus()),
            Some(key) => match Focus::from_key(key) {
                Some(focus) => Ok(focus),
                None => {
                    bail!("Unknown goal '{key}' (expected control, fitness, shooting or weekly)")
                }
            },
        }
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            adjust_durations: self.adjust_durations,
            annotate_position: self.annotate_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::Goal;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "pitch-night");
        assert_eq!(config.default_goal, "control");
        assert!(config.adjust_durations);
        assert!(config.annotate_position);
        assert_eq!(config.log_level, "info");
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
default_goal = "weekly"
adjust_durations = false
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.focus(), Focus::Weekly);
        assert!(!config.plan_options().adjust_durations);
        assert!(config.plan_options().annotate_position);
        assert_eq!(config.theme, "pitch-night");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.data_dir = Some(PathBuf::from("/tmp/pitchside"));
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.default_goal, deserialized.default_goal);
        assert_eq!(config.data_dir, deserialized.data_dir);
    }

    #[test]
    fn test_normalize_unknown_goal_resets() {
        let mut config = Config::default();
        config.default_goal = "dribbling".to_string();
        config.normalize();
        assert_eq!(config.default_goal, "control");
        assert_eq!(config.focus(), Focus::Goal(Goal::Control));
    }

    #[test]
    fn test_normalize_valid_goal_unchanged() {
        let mut config = Config::default();
        config.default_goal = "shooting".to_string();
        config.normalize();
        assert_eq!(config.focus(), Focus::Goal(Goal::Shooting));
    }

    #[test]
    fn test_goal_override_leaves_config_untouched() {
        let config = Config::default();
        let focus = config.startup_focus(Some("weekly")).unwrap();
        assert_eq!(focus, Focus::Weekly);
        assert_eq!(config.default_goal, "control");

        let saved = toml::to_string_pretty(&config).unwrap();
        assert!(saved.contains("default_goal = \"control\""));
        assert!(!saved.contains("weekly"));
    }

    #[test]
    fn test_startup_focus_rejects_unknown_goal() {
        let config = Config::default();
        let err = config.startup_focus(Some("dribbling")).unwrap_err();
        assert!(err.to_string().contains("Unknown goal 'dribbling'"));
        assert_eq!(config.startup_focus(None).unwrap(), config.focus());
    }
}
