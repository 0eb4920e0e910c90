//! Connection settings for the HSDS service.
//!
//! Values are layered: `~/.hscfg`, then the `HS_ENDPOINT`, `HS_USERNAME` and
//! `HS_PASSWORD` environment variables, then command-line flags. A later
//! layer replaces earlier values key by key.

use crate::{
    auth::{BasicAuth, NoAuth},
    client::HsdsClient,
    error::{ConfigError, HsdsResult},
};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use url::Url;

pub const ENDPOINT_VAR: &str = "HS_ENDPOINT";
pub const USERNAME_VAR: &str = "HS_USERNAME";
pub const PASSWORD_VAR: &str = "HS_PASSWORD";

/// Endpoint and credentials
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Config {
    /// Read `~/.hscfg` (if present) and apply environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading config from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_hscfg_str(&text, &path.display().to_string()))
    }

    /// Parse `key = value` lines; lines starting with `#` are comments.
    /// Unknown keys are ignored and malformed lines are skipped with a warning.
    pub fn from_hscfg_str(text: &str, origin: &str) -> Self {
        let mut config = Self::default();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!("{}:{}: expected `key = value`, skipping line", origin, index + 1);
                continue;
            };
            let value = value.trim();
            // h5pyd writes "None" for unset values
            let value = (!value.is_empty() && value != "None").then(|| value.to_string());
            match key.trim() {
                "hs_endpoint" => config.endpoint = value,
                "hs_username" => config.username = value,
                "hs_password" => config.password = value,
                other => debug!("Ignoring config key {}", other),
            }
        }
        config
    }

    /// Replace values with whatever `lookup` returns for the HS_* variables
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup(ENDPOINT_VAR) {
            self.endpoint = Some(v);
        }
        if let Some(v) = lookup(USERNAME_VAR) {
            self.username = Some(v);
        }
        if let Some(v) = lookup(PASSWORD_VAR) {
            self.password = Some(v);
        }
    }

    /// Command-line values win over everything else
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        self.endpoint = endpoint.or(self.endpoint);
        self.username = username.or(self.username);
        self.password = password.or(self.password);
        self
    }

    /// Endpoint must be set and be an http(s) URL
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let endpoint = self.endpoint.as_deref().ok_or(ConfigError::MissingEndpoint)?;
        let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ConfigError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme {}", scheme),
            }),
        }
    }

    /// Build a client; basic auth when a username is configured
    pub fn client(&self, endpoint: &Url) -> HsdsResult<HsdsClient> {
        match &self.username {
            Some(username) => HsdsClient::new(
                endpoint,
                BasicAuth::new(username, self.password.clone().unwrap_or_default()),
            ),
            None => HsdsClient::new(endpoint, NoAuth),
        }
    }
}

/// `$HOME/.hscfg`
pub fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".hscfg"))
}
