use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use url::Url;

use crate::client::DEFAULT_LANGUAGE;

/// Credentials and request defaults stored on disk.
///
/// Example TOML:
/// ```toml
/// key_path = "/secure/AuthKey_ABC123DEFG.p8"
/// key_id = "ABC123DEFG"
/// team_id = "TEAM123456"
/// bundle_id = "com.example.weather"
/// language = "en"
/// timezone = "Europe/Berlin"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// PKCS#8 P-256 private key downloaded from the developer portal.
    pub key_path: PathBuf,
    pub key_id: String,
    pub team_id: String,
    /// Service id registered for WeatherKit.
    pub bundle_id: String,

    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Overrides the production endpoint, e.g. for a proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_ttl_secs: Option<u64>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Config {
    pub fn new(
        key_path: impl Into<PathBuf>,
        key_id: impl Into<String>,
        team_id: impl Into<String>,
        bundle_id: impl Into<String>,
    ) -> Self {
        Self {
            key_path: key_path.into(),
            key_id: key_id.into(),
            team_id: team_id.into(),
            bundle_id: bundle_id.into(),
            language: default_language(),
            timezone: None,
            base_url: None,
            token_ttl_secs: None,
        }
    }

    /// Load config from the platform config directory.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            bail!(
                "No configuration found at {}.\n\
                 Hint: create it with key_path, key_id, team_id and bundle_id.",
                path.display()
            );
        }

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
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

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherkit", "weatherkit")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Configured token lifetime, if any.
    pub fn token_ttl(&self) -> Result<Option<chrono::Duration>> {
        self.token_ttl_secs
            .map(|secs| {
                let secs = i64::try_from(secs)
                    .with_context(|| format!("token_ttl_secs out of range: {secs}"))?;
                chrono::Duration::try_seconds(secs)
                    .ok_or_else(|| anyhow!("token_ttl_secs out of range: {secs}"))
            })
            .transpose()
    }

    /// Parsed `base_url`, if any.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("Invalid base_url: {raw}")))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config::new("/keys/AuthKey.p8", "ABC123DEFG", "TEAM123456", "com.example.weather")
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let cfg: Config = toml::from_str(
            r#"
            key_path = "/keys/AuthKey.p8"
            key_id = "ABC123DEFG"
            team_id = "TEAM123456"
            bundle_id = "com.example.weather"
            "#,
        )
        .expect("minimal config must parse");

        assert_eq!(cfg, sample());
        assert_eq!(cfg.language, "en");
        assert!(cfg.timezone.is_none());
        assert!(cfg.token_ttl().unwrap().is_none());
        assert!(cfg.base_url().unwrap().is_none());
    }

    #[test]
    fn missing_credentials_fail_to_parse() {
        let err = toml::from_str::<Config>(r#"key_id = "ABC123DEFG""#).unwrap_err();
        assert!(err.to_string().contains("key_path"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = sample();
        cfg.language = "de".into();
        cfg.timezone = Some("Europe/Berlin".into());
        cfg.token_ttl_secs = Some(600);
        cfg.save_to(&path).expect("save must create parent dirs");

        let loaded = Config::from_file(&path).expect("saved config must load");
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.token_ttl().unwrap(), Some(chrono::Duration::seconds(600)));
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn invalid_base_url_is_an_error() {
        let mut cfg = sample();
        cfg.base_url = Some("not a url".into());
        assert!(cfg.base_url().is_err());

        cfg.base_url = Some("http://localhost:8080/api/v1/".into());
        let url = cfg.base_url().unwrap().unwrap();
        assert_eq!(url.path(), "/api/v1/");
    }
}
