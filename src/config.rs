/// Configuration module.
///
/// Handles loading, validating, and providing default configuration values
/// for the translation provider and the hover pipeline.
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const DEFAULT_CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "russian-hover";

// ── Default value functions ──────────────────────────────────────────

fn default_api_url() -> String {
    "https://api.deepseek.com/chat/completions".to_string()
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_api_key_env() -> String {
    "DEEPSEEK_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_local_debounce_ms() -> u64 {
    500
}

fn default_global_debounce_ms() -> u64 {
    1000
}

fn default_move_threshold_px() -> f64 {
    5.0
}

fn default_capture_radius() -> u32 {
    100
}

fn default_auto_hide_ms() -> u64 {
    10_000
}

fn default_exit_grace_ms() -> u64 {
    3000
}

fn default_event_queue() -> usize {
    256
}

// ── Config structs ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub translation: TranslationConfig,

    #[serde(default)]
    pub hover: HoverConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TranslationConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the API key. The key itself is never
    /// written to the config file.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HoverConfig {
    /// Settle window for the text-surface stream.
    #[serde(default = "default_local_debounce_ms")]
    pub local_debounce_ms: u64,

    /// Settle window for the screen-wide stream.
    #[serde(default = "default_global_debounce_ms")]
    pub global_debounce_ms: u64,

    /// Screen motion at or below this distance does not re-arm the timer.
    #[serde(default = "default_move_threshold_px")]
    pub move_threshold_px: f64,

    /// Half-size of the square captured around the pointer for recognition.
    #[serde(default = "default_capture_radius")]
    pub capture_radius: u32,

    #[serde(default = "default_auto_hide_ms")]
    pub auto_hide_ms: u64,

    /// Popup lifetime once the pointer leaves it.
    #[serde(default = "default_exit_grace_ms")]
    pub exit_grace_ms: u64,

    /// Capacity of each resolver's event queue.
    #[serde(default = "default_event_queue")]
    pub event_queue: usize,
}

// ── Default impls ────────────────────────────────────────────────────

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            local_debounce_ms: default_local_debounce_ms(),
            global_debounce_ms: default_global_debounce_ms(),
            move_threshold_px: default_move_threshold_px(),
            capture_radius: default_capture_radius(),
            auto_hide_ms: default_auto_hide_ms(),
            exit_grace_ms: default_exit_grace_ms(),
            event_queue: default_event_queue(),
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl TranslationConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl HoverConfig {
    #[must_use]
    pub fn local_debounce(&self) -> Duration {
        Duration::from_millis(self.local_debounce_ms)
    }

    #[must_use]
    pub fn global_debounce(&self) -> Duration {
        Duration::from_millis(self.global_debounce_ms)
    }

    #[must_use]
    pub fn auto_hide(&self) -> Duration {
        Duration::from_millis(self.auto_hide_ms)
    }

    #[must_use]
    pub fn exit_grace(&self) -> Duration {
        Duration::from_millis(self.exit_grace_ms)
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// If `config_path` is empty, looks for `config.json` in the working
    /// directory, then in the user config directory. A missing file yields
    /// the defaults; so does a file that is not valid JSON.
    pub fn load(config_path: &str) -> Result<Self> {
        let path = if config_path.is_empty() {
            default_config_path()
        } else {
            PathBuf::from(config_path)
        };

        if !path.exists() {
            info!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let cfg: Config = match serde_json::from_str(&data) {
            Ok(c) => c,
            Err(e) => {
                warn!("Invalid JSON in {}: {e}", path.display());
                warn!("Using default configuration");
                return Ok(Self::default());
            }
        };

        info!("Loaded configuration from {}", path.display());
        Ok(cfg)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let t = &self.translation;
        anyhow::ensure!(!t.api_url.is_empty(), "translation.api_url must be set");
        anyhow::ensure!(!t.model.is_empty(), "translation.model must be set");
        anyhow::ensure!(
            (0.0..=2.0).contains(&t.temperature),
            "translation.temperature must be within 0..=2"
        );

        let h = &self.hover;
        anyhow::ensure!(
            h.local_debounce_ms > 0,
            "hover.local_debounce_ms must be positive"
        );
        anyhow::ensure!(
            h.global_debounce_ms > 0,
            "hover.global_debounce_ms must be positive"
        );
        anyhow::ensure!(
            h.move_threshold_px > 0.0,
            "hover.move_threshold_px must be positive"
        );
        anyhow::ensure!(h.capture_radius > 0, "hover.capture_radius must be positive");
        anyhow::ensure!(h.event_queue > 0, "hover.event_queue must be positive");
        Ok(())
    }
}

/// `./config.json` if present, otherwise the per-user location.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join(DEFAULT_CONFIG_FILE))
        .unwrap_or(local)
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.hover.local_debounce_ms, 500);
        assert_eq!(config.hover.global_debounce_ms, 1000);
        assert_eq!(config.hover.exit_grace_ms, 3000);
        assert_eq!(config.hover.capture_radius, 100);
        assert_eq!(config.translation.model, "deepseek-chat");
        assert_eq!(config.translation.api_key_env, "DEEPSEEK_API_KEY");
        assert!((config.translation.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{"hover": {"local_debounce_ms": 250}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.hover.local_debounce_ms, 250);
        // Other fields should have defaults
        assert_eq!(config.hover.global_debounce_ms, 1000);
        assert_eq!(config.translation.timeout_secs, 30);
    }

    #[test]
    fn test_validate_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_debounce() {
        let mut config = Config::default();
        config.hover.local_debounce_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let mut config = Config::default();
        config.translation.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("absent.json");
        let config = Config::load(&path.to_string_lossy()).unwrap();
        assert_eq!(config.hover.local_debounce_ms, 500);
    }

    #[test]
    fn test_load_invalid_json_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let config = Config::load(&path.to_string_lossy()).unwrap();
        assert_eq!(config.hover.global_debounce_ms, 1000);
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");

        let mut config = Config::default();
        config.hover.capture_radius = 64;
        config.translation.model = "other-model".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path.to_string_lossy()).unwrap();
        assert_eq!(loaded.hover.capture_radius, 64);
        assert_eq!(loaded.translation.model, "other-model");
    }
}
