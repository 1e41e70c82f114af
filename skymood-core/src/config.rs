use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::forecast::DayBoundary;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// City shown when none is given on the command line or in the config.
pub const FALLBACK_CITY: &str = "sydney";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Oslo"
/// day_boundary = "city"
/// asset_dir = "/usr/share/skymood/videos"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    pub default_city: Option<String>,

    /// One of "city", "utc" or "viewer".
    pub day_boundary: Option<String>,

    /// Directory holding the background clips.
    pub asset_dir: Option<PathBuf>,

    /// Override for the OpenWeather API root, mainly for testing.
    pub base_url: Option<String>,
}

impl Config {
    /// API key from the environment, falling back to the stored one.
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(FALLBACK_CITY)
    }

    /// Return the configured day boundary, `city` when unset.
    pub fn day_boundary(&self) -> Result<DayBoundary> {
        match &self.day_boundary {
            Some(s) => DayBoundary::try_from(s.as_str()),
            None => Ok(DayBoundary::default()),
        }
    }

    pub fn set_day_boundary(&mut self, boundary: DayBoundary) {
        self.day_boundary = Some(boundary.as_str().to_string());
    }

    /// Where a background clip is expected to live.
    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        match &self.asset_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from("/").join(file_name),
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skymood", "skymood")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// A non-blank environment value wins over the stored key.
fn resolve_api_key(env: Option<String>, stored: Option<&str>) -> Option<String> {
    env.map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .or_else(|| stored.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_boundary_defaults_to_city() {
        let cfg = Config::default();
        assert_eq!(cfg.day_boundary().unwrap(), DayBoundary::City);
    }

    #[test]
    fn set_day_boundary_overrides_default() {
        let mut cfg = Config::default();
        cfg.set_day_boundary(DayBoundary::Utc);
        assert_eq!(cfg.day_boundary().unwrap(), DayBoundary::Utc);
    }

    #[test]
    fn invalid_day_boundary_is_reported() {
        let cfg = Config { day_boundary: Some("tomorrow".into()), ..Config::default() };
        let err = cfg.day_boundary().unwrap_err();
        assert!(err.to_string().contains("Unknown day boundary"));
    }

    #[test]
    fn default_city_falls_back_to_sydney() {
        let mut cfg = Config::default();
        assert_eq!(cfg.default_city(), "sydney");

        cfg.default_city = Some("Reykjavik".into());
        assert_eq!(cfg.default_city(), "Reykjavik");
    }

    #[test]
    fn set_api_key_trims_input() {
        let mut cfg = Config::default();
        cfg.set_api_key("  abc123\n".into());
        assert_eq!(cfg.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn env_api_key_overrides_stored() {
        let key = resolve_api_key(Some("FROM_ENV".into()), Some("FROM_FILE"));
        assert_eq!(key.as_deref(), Some("FROM_ENV"));
    }

    #[test]
    fn blank_env_api_key_falls_back_to_stored() {
        let key = resolve_api_key(Some("   ".into()), Some("FROM_FILE"));
        assert_eq!(key.as_deref(), Some("FROM_FILE"));

        let key = resolve_api_key(None, Some("FROM_FILE"));
        assert_eq!(key.as_deref(), Some("FROM_FILE"));
    }

    #[test]
    fn no_api_key_anywhere() {
        assert_eq!(resolve_api_key(None, None), None);
        assert_eq!(resolve_api_key(Some(String::new()), None), None);
    }

    #[test]
    fn asset_path_joins_configured_dir() {
        let cfg = Config { asset_dir: Some(PathBuf::from("/srv/clips")), ..Config::default() };
        assert_eq!(cfg.asset_path("snow.mp4"), PathBuf::from("/srv/clips/snow.mp4"));
        assert_eq!(Config::default().asset_path("snow.mp4"), PathBuf::from("/snow.mp4"));
    }
}
