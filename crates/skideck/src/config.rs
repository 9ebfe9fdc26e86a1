use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::deck::panels::DeckMode;
use crate::sync::companion::CompanionMode;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "skideck";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync: Option<SyncConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// 1-indexed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_slide: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<DeckMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion: Option<CompanionMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_dir: Option<PathBuf>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `skideck config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# skideck configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn dark_theme(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .is_some_and(|t| t == "dark")
    }

    pub fn start_slide(&self) -> Option<usize> {
        self.defaults.as_ref().and_then(|d| d.start_slide)
    }

    pub fn mode(&self) -> Option<DeckMode> {
        self.defaults.as_ref().and_then(|d| d.mode)
    }

    pub fn sync_enabled(&self) -> bool {
        self.sync.as_ref().and_then(|s| s.enabled).unwrap_or(true)
    }

    pub fn companion(&self) -> CompanionMode {
        self.sync
            .as_ref()
            .and_then(|s| s.companion)
            .unwrap_or_default()
    }

    pub fn channel_dir(&self) -> Option<PathBuf> {
        self.sync.as_ref().and_then(|s| s.channel_dir.clone())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.start_slide" => {
                let slide = match value.parse::<usize>() {
                    Ok(n) if n >= 1 => n,
                    _ => anyhow::bail!(
                        "Invalid start_slide: {value}. Must be a slide number starting at 1."
                    ),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_slide = Some(slide);
            }
            "defaults.mode" => {
                let Some(mode) = DeckMode::from_name(value) else {
                    anyhow::bail!("Invalid mode: {value}. Must be 'presenter' or 'local'.");
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .mode = Some(mode);
            }
            "sync.enabled" => {
                let enabled = match value {
                    "true" => true,
                    "false" => false,
                    _ => anyhow::bail!("Invalid sync.enabled: {value}. Must be 'true' or 'false'."),
                };
                self.sync.get_or_insert_with(SyncConfig::default).enabled = Some(enabled);
            }
            "sync.companion" => {
                let Some(companion) = CompanionMode::from_name(value) else {
                    anyhow::bail!(
                        "Invalid companion: {value}. Must be 'process', 'window', or 'none'."
                    );
                };
                self.sync.get_or_insert_with(SyncConfig::default).companion = Some(companion);
            }
            "sync.channel_dir" => {
                if value.trim().is_empty() {
                    anyhow::bail!("Invalid channel_dir: path must not be empty.");
                }
                self.sync.get_or_insert_with(SyncConfig::default).channel_dir =
                    Some(PathBuf::from(value));
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.start_slide, defaults.mode, sync.enabled, sync.companion, sync.channel_dir"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_valid_keys() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.start_slide", "3").unwrap();
        config.set("defaults.mode", "local").unwrap();
        config.set("sync.enabled", "false").unwrap();
        config.set("sync.companion", "window").unwrap();
        config.set("sync.channel_dir", "/tmp/skideck").unwrap();

        assert!(config.dark_theme());
        assert_eq!(config.start_slide(), Some(3));
        assert_eq!(config.mode(), Some(DeckMode::Local));
        assert!(!config.sync_enabled());
        assert_eq!(config.companion(), CompanionMode::Window);
        assert_eq!(config.channel_dir(), Some(PathBuf::from("/tmp/skideck")));
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("defaults.theme", "sepia").is_err());
        assert!(config.set("defaults.start_slide", "0").is_err());
        assert!(config.set("defaults.start_slide", "first").is_err());
        assert!(config.set("defaults.mode", "audience").is_err());
        assert!(config.set("sync.enabled", "yes").is_err());
        assert!(config.set("sync.companion", "tab").is_err());
        assert!(config.set("sync.channel_dir", " ").is_err());
        assert!(config.defaults.is_none());
        assert!(config.sync.is_none());
    }

    #[test]
    fn test_unknown_key() {
        let err = Config::default().set("ai.provider", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::default();
        assert!(!config.dark_theme());
        assert!(config.sync_enabled());
        assert_eq!(config.companion(), CompanionMode::Process);
        assert_eq!(config.mode(), None);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut config = Config::default();
        config.set("defaults.mode", "presenter").unwrap();
        config.set("sync.companion", "none").unwrap();
        config.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# skideck configuration"));
        assert!(written.contains("mode: presenter"));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.mode(), Some(DeckMode::Presenter));
        assert_eq!(loaded.companion(), CompanionMode::None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join(FILENAME)).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
