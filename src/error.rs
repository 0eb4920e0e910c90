use thiserror::Error;

/// HSDS client error types
#[derive(Error, Debug)]
pub enum HsdsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Result type for HSDS operations
pub type HsdsResult<T> = Result<T, HsdsError>;

impl HsdsError {
    /// Create an API error from a status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// HTTP status this error corresponds to, if it came from the service
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth(_) => Some(401),
            Self::PermissionDenied(_) => Some(403),
            Self::ObjectNotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::InvalidParameter(_) => Some(400),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 404 Not Found and 410 Gone
    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404) | Some(410))
    }
}

/// Errors raised while touching a single domain
#[derive(Error, Debug)]
pub enum TouchError {
    #[error("domain: {domain} {reason}")]
    InvalidDomain { domain: String, reason: &'static str },

    #[error("can't create top-level domain: {domain}")]
    TopLevelDomain { domain: String },

    #[error("Parent domain: {parent} not found")]
    ParentNotFound { parent: String },

    #[error("Authorization failure: {domain}")]
    Authorization { domain: String },

    #[error("Not allowed: {domain}")]
    Permission { domain: String },

    #[error("Unexpected error for {domain}: {message}")]
    Unexpected { domain: String, message: String },
}

impl TouchError {
    pub fn unexpected(domain: impl Into<String>, source: &HsdsError) -> Self {
        Self::Unexpected {
            domain: domain.into(),
            message: source.to_string(),
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no endpoint configured (use -e, HS_ENDPOINT or hs_endpoint in ~/.hscfg)")]
    MissingEndpoint,

    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
