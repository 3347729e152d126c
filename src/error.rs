use std::fmt;

use thiserror::Error;

/// Classification of a failed product fetch.
///
/// - `Transport`: non-2xx status (other than 404), unreachable host, timeout
/// - `NotFound`: HTTP 404, usually an unknown category
/// - `Parse`: the body was not a valid product list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    NotFound,
    Parse,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchErrorKind::Transport => "Transport",
            FetchErrorKind::NotFound => "Not found",
            FetchErrorKind::Parse => "Parse",
        };
        f.write_str(label)
    }
}

/// Error returned by a product fetch.
///
/// Cloneable so the controller can hand it to the rendering surface as part of
/// every state snapshot.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} error: {detail}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    /// HTTP status, when the service answered at all.
    pub status: Option<u16>,
    pub detail: String,
}

impl FetchError {
    pub fn transport(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::NotFound,
            status: Some(404),
            detail: detail.into(),
        }
    }

    pub fn parse(detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Parse,
            status: None,
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return FetchError::parse(err.to_string());
        }
        FetchError::transport(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Error raised while assembling [`crate::config::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
