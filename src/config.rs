//! Application configuration stored as TOML in the user's config directory
//!
//! Missing files are created with defaults on first start; missing fields
//! inside an existing file fall back to their defaults, so older files keep
//! loading after new settings are added.

use crate::game::{ControllerSettings, SelectionIndex};
use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

const CONFIG_DIR: &str = "launch-clock";
const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub timing: TimingConfig,
    pub keys: KeysConfig,
    pub game: GameConfig,
    pub vote: VoteConfig,
    pub ui: UiConfig,
}

/// Game timings in milliseconds
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub arbitration_window_ms: u64,
    pub countdown_ticks: u8,
    pub countdown_tick_ms: u64,
    pub auto_reset_ms: u64,
    pub transition_ms: u64,
    pub display_poll_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            arbitration_window_ms: 1000,
            countdown_ticks: 3,
            countdown_tick_ms: 1000,
            auto_reset_ms: 10_000,
            transition_ms: 600,
            display_poll_ms: 10,
        }
    }
}

impl From<&TimingConfig> for ControllerSettings {
    fn from(timing: &TimingConfig) -> Self {
        Self {
            arbitration_window: Duration::from_millis(timing.arbitration_window_ms),
            countdown_ticks: timing.countdown_ticks,
            countdown_tick: Duration::from_millis(timing.countdown_tick_ms),
            auto_reset: Duration::from_millis(timing.auto_reset_ms),
            transition: Duration::from_millis(timing.transition_ms),
            display_poll: Duration::from_millis(timing.display_poll_ms),
        }
    }
}

/// Key names as understood by `egui::Key::from_name`
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct KeysConfig {
    pub navigate_left: String,
    pub navigate_right: String,
    pub action_one: String,
    pub action_two: String,
    pub resync: String,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            navigate_left: "ArrowLeft".to_string(),
            navigate_right: "ArrowRight".to_string(),
            action_one: "A".to_string(),
            action_two: "B".to_string(),
            resync: "R".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Catalog index shown at start, clamped if out of range
    pub initial_car: usize,
}

impl GameConfig {
    pub fn initial_selection(&self) -> SelectionIndex {
        SelectionIndex::from_raw(self.initial_car)
    }
}

/// MQTT broker receiving the votes
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct VoteConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub topic_prefix: String,
    pub thanks_ms: u64,
}

impl Default for VoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "localhost".to_string(),
            port: 1883,
            client_id: "launch-clock".to_string(),
            user: None,
            password: None,
            topic_prefix: "votes2".to_string(),
            thanks_ms: 2000,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub fullscreen: bool,
    pub repaint_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            fullscreen: true,
            repaint_ms: 16,
        }
    }
}

impl AppConfig {
    /// `<config dir>/launch-clock/config.toml`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| {
            warn!("No config directory available, using working directory");
            PathBuf::from(".")
        });
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        path
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings::from(&self.timing)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| eyre!("Failed to serialize config: {}", e))?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| eyre!("Failed to write config file {}: {}", path.display(), e))?;
        Ok(())
    }

    /// Loads the config, writing the defaults first if the file does not exist
    pub async fn load_or_create(path: &Path) -> Result<Self> {
        if tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check if config file exists: {}", e))?
        {
            let config = Self::load(path).await?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            warn!(
                "Config file {} does not exist, creating default",
                path.display()
            );
            let config = Self::default();
            config.save(path).await?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("launch-clock-test-{}-{}", name, std::process::id()));
        path.push(CONFIG_FILE);
        path
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [timing]
            auto_reset_ms = 5000

            [keys]
            action_one = "Space"
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.timing.auto_reset_ms, 5000);
        assert_eq!(config.timing.arbitration_window_ms, 1000);
        assert_eq!(config.keys.action_one, "Space");
        assert_eq!(config.keys.action_two, "B");
        assert!(!config.vote.enabled);
    }

    #[test]
    fn timing_converts_to_controller_settings() {
        let settings = AppConfig::default().controller_settings();
        assert_eq!(settings, ControllerSettings::default());
    }

    #[tokio::test]
    async fn load_or_create_writes_defaults_then_reads_them_back() {
        let path = temp_config_path("create");
        let _ = tokio::fs::remove_file(&path).await;

        let created = AppConfig::load_or_create(&path)
            .await
            .expect("default config should be written");
        assert!(path.exists());

        let loaded = AppConfig::load_or_create(&path)
            .await
            .expect("written config should load");
        assert_eq!(created, loaded);

        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }

    #[tokio::test]
    async fn invalid_toml_is_an_error() {
        let path = temp_config_path("invalid");
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await.expect("temp dir");
        }
        tokio::fs::write(&path, "timing = [").await.expect("write");

        assert!(AppConfig::load(&path).await.is_err());

        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }
}
