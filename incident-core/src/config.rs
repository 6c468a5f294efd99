use std::env;
use thiserror::Error;
use url::{ParseError, Url};

pub const API_URL_ENV: &str = "INCIDENT_API_URL";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend url '{value}': {source}")]
    InvalidUrl {
        value: String,
        source: ParseError,
    },
    #[error("backend url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("backend url '{0}' cannot be used as a base")]
    NotABase(String),
}

/// The single backend endpoint shared by every network operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let base_url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
            value: raw.to_owned(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(raw.to_owned()));
        }
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::NotABase(raw.to_owned()));
        }
        Ok(Self { base_url })
    }

    /// Reads `INCIDENT_API_URL` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_value(env::var(API_URL_ENV).ok().as_deref())
    }

    /// Uses `value` when set and non-blank, the loopback default otherwise.
    pub fn from_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Self::new(v),
            None => Self::new(DEFAULT_API_URL),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn incidents_url(&self) -> Url {
        self.endpoint(&["incidents"])
    }

    pub fn status_url(&self, incident_id: &str) -> Url {
        self.endpoint(&["incidents", incident_id, "status"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
