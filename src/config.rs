use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::layout::Platform;

pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Product service root, e.g. `http://127.0.0.1:8001/api`.
    pub service_url: String,
    /// `None` means "use the compile target".
    pub platform: Option<Platform>,
    /// Carousel auto-advance period; `0` disables it.
    pub auto_advance_secs: u64,
    pub request_timeout_secs: u64,
    /// `tracing` filter directive, e.g. `info` or `storefront_carousel=debug`.
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8001/api".into(),
            platform: None,
            auto_advance_secs: 4,
            request_timeout_secs: 10,
            log_filter: "info".into(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Override fields from `STOREFRONT_*` variables found through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("STOREFRONT_SERVICE_URL") {
            self.service_url = v;
        }
        if let Some(v) = lookup("STOREFRONT_PLATFORM") {
            self.platform = Some(v.parse().map_err(|_| invalid("STOREFRONT_PLATFORM", &v))?);
        }
        if let Some(v) = lookup("STOREFRONT_AUTO_ADVANCE_SECS") {
            self.auto_advance_secs = v
                .trim()
                .parse()
                .map_err(|_| invalid("STOREFRONT_AUTO_ADVANCE_SECS", &v))?;
        }
        if let Some(v) = lookup("STOREFRONT_TIMEOUT_SECS") {
            self.request_timeout_secs = v
                .trim()
                .parse()
                .map_err(|_| invalid("STOREFRONT_TIMEOUT_SECS", &v))?;
        }
        if let Some(v) = lookup("STOREFRONT_LOG") {
            self.log_filter = v;
        }
        if let Some(v) = lookup("STOREFRONT_LOG_FILE") {
            self.log_file = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::detect)
    }

    pub fn auto_advance(&self) -> Duration {
        Duration::from_secs(self.auto_advance_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

/// Load settings: defaults, then the TOML file, then the environment.
///
/// An explicit `path` must exist; the default `storefront.toml` is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let mut settings = match fs::read_to_string(&path) {
        Ok(raw) => Settings::from_toml_str(&raw)?,
        Err(e) if e.kind() == ErrorKind::NotFound && !required => Settings::default(),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    settings.apply_env(|key| std::env::var(key).ok())?;
    Ok(settings)
}
