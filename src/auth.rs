use crate::error::{HsdsError, HsdsResult};
use base64::{Engine, engine::general_purpose};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Authentication applied to every HSDS request
#[async_trait::async_trait]
pub trait Authentication: Send + Sync {
    /// Apply authentication to the request headers
    async fn apply_auth(&self, headers: &mut HeaderMap) -> HsdsResult<()>;
}

/// HTTP basic authentication with the HSDS username/password pair
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn header_value(&self) -> HsdsResult<HeaderValue> {
        let credentials = format!("{}:{}", self.username, self.password);
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
            .parse()
            .map_err(|e| HsdsError::auth_error(format!("Invalid auth header: {}", e)))
    }
}

// Keeps the password out of log output.
impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[async_trait::async_trait]
impl Authentication for BasicAuth {
    async fn apply_auth(&self, headers: &mut HeaderMap) -> HsdsResult<()> {
        headers.insert(AUTHORIZATION, self.header_value()?);
        Ok(())
    }
}

/// No authentication, for services that allow anonymous access
#[derive(Debug, Clone)]
pub struct NoAuth;

#[async_trait::async_trait]
impl Authentication for NoAuth {
    async fn apply_auth(&self, _headers: &mut HeaderMap) -> HsdsResult<()> {
        Ok(())
    }
}
