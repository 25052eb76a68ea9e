use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("invalid API base `{0}`")]
    InvalidApiBase(String),
}

/// Where the slider's images come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GallerySource {
    #[default]
    Remote,
    Seeded,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: Option<String>,
    pub page_host: String,
    pub local_api_base: String,
    pub deployed_api_base: String,
    pub dev_hosts: Vec<String>,
    pub gallery: GallerySource,
    pub gallery_images: Option<Vec<String>>,
    pub default_image: String,
    pub slide_interval_ms: u64,
    pub confirmation_page: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            page_host: "localhost".to_string(),
            local_api_base: "http://127.0.0.1:8000".to_string(),
            deployed_api_base: "https://event-booking-system.onrender.com".to_string(),
            dev_hosts: vec!["localhost".to_string(), "127.0.0.1".to_string()],
            gallery: GallerySource::Remote,
            gallery_images: None,
            default_image: "images/default.jpg".to_string(),
            slide_interval_ms: 3000,
            confirmation_page: "success.html".to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit file, or the per-user default location if it exists,
    /// then apply `EVENTBOOK_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "loaded config file");
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub(crate) fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("EVENTBOOK_API_BASE").filter(|v| !v.trim().is_empty()) {
            self.api_base = Some(v);
        }
        if let Some(v) = var("EVENTBOOK_PAGE_HOST").filter(|v| !v.trim().is_empty()) {
            self.page_host = v;
        }
        if let Some(v) = var("EVENTBOOK_SLIDE_INTERVAL_MS") {
            match v.trim().parse() {
                Ok(ms) => self.slide_interval_ms = ms,
                Err(e) => warn!("Invalid EVENTBOOK_SLIDE_INTERVAL_MS value `{}`: {}", v, e),
            }
        }
    }

    /// Resolve API_BASE: a fixed value wins, otherwise pick by the page's host name.
    pub fn api_base(&self) -> Result<String, ConfigError> {
        let raw = match &self.api_base {
            Some(fixed) => fixed.as_str(),
            None if self.is_dev_host() => self.local_api_base.as_str(),
            None => self.deployed_api_base.as_str(),
        };
        let base = raw.trim().trim_end_matches('/');
        match Url::parse(base) {
            Ok(u) if matches!(u.scheme(), "http" | "https") && u.host_str().is_some() => Ok(base.to_string()),
            _ => Err(ConfigError::InvalidApiBase(raw.to_string())),
        }
    }

    fn is_dev_host(&self) -> bool {
        let host = self.page_host.trim().to_ascii_lowercase();
        self.dev_hosts.iter().any(|h| h.trim().eq_ignore_ascii_case(&host))
    }

    pub fn slide_interval(&self) -> Duration {
        Duration::from_millis(self.slide_interval_ms.max(1))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "eventbook", "eventbook").map(|p| p.config_dir().join("eventbook.toml"))
}
