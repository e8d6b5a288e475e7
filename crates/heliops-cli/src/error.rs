//! Error types for the HeliOps CLI
//!
//! Backend failures carry a structured [`ApiErrorKind`] so screens decide how
//! to react (forced logout, permission message, generic banner) by matching
//! on the kind rather than on message text.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Closed set of failure kinds for backend calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401, the token is missing or expired
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 400 or 422, the backend rejected the submitted record
    Validation,
    /// Any other non-2xx status
    Server,
    /// The request never produced a response
    Network,
    /// The response body was not the JSON we expected
    Decode,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            400 | 422 => ApiErrorKind::Validation,
            _ => ApiErrorKind::Server,
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::Forbidden => "forbidden",
            ApiErrorKind::NotFound => "not found",
            ApiErrorKind::Validation => "validation failed",
            ApiErrorKind::Server => "server error",
            ApiErrorKind::Network => "network error",
            ApiErrorKind::Decode => "unexpected response",
        };
        f.write_str(name)
    }
}

/// A failed backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Message from the response body, or a description of the failure
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::from_status(status),
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ApiError::from_status(status.as_u16(), err.to_string());
        }

        let kind = if err.is_decode() {
            ApiErrorKind::Decode
        } else {
            ApiErrorKind::Network
        };

        ApiError::new(kind, err.to_string())
    }
}

/// Errors surfaced to the person at the terminal
#[derive(Error, Debug)]
pub enum CliError {
    /// Backend call failed
    #[error("API request failed ({0}). Check the API URL with 'heliops config show'.")]
    Api(#[from] ApiError),

    /// No stored session
    #[error("Not logged in. Run 'heliops login <email>' first.")]
    NotLoggedIn,

    /// Upload rejected before any network call
    #[error("File is too large: {size} bytes exceeds the {limit} byte upload limit.")]
    FileTooLarge { size: u64, limit: u64 },

    /// Object storage operation failed
    #[error("Storage error: {0}. Check the HELIOPS_STORAGE_* settings.")]
    Storage(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or config file.")]
    Config(String),

    /// Session file could not be read or written
    #[error("Session error: {0}. Run 'heliops logout' to reset the stored session.")]
    Session(String),

    /// Unknown resource name on the command line
    #[error("Unknown resource '{0}'. Run 'heliops list --help' to see available resources.")]
    UnknownResource(String),

    /// Fleet math or model parsing failed
    #[error(transparent)]
    Domain(#[from] heliops_common::HeliopsError),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}. Check the file syntax.")]
    JsonParse(#[from] serde_json::Error),

    /// TOML config parsing failed
    #[error("Failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Interactive prompt failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<reqwest::Error> for CliError {
    fn from(err: reqwest::Error) -> Self {
        CliError::Api(err.into())
    }
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a session error
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// The structured kind, when this is a backend failure
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            CliError::Api(e) => Some(e.kind),
            _ => None,
        }
    }
}
