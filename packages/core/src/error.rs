use thiserror::Error;

use crate::models::FieldError;
use crate::validation::ValidationError;

/// Unified application error.
///
/// Every layer (config, session file, network, decoding, the remote API)
/// fails through this type so the CLI can report it in one place.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("You are not logged in. Run `board login` first.")]
    NotLoggedIn,

    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    #[error("Not permitted: {0}")]
    NotPermitted(String),

    #[error("{message} (HTTP {status})")]
    Api {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },
}

impl AppError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// HTTP status of an API rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Field-level messages returned by the server, if any.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Transport-level failures are the only ones the sample fallback covers.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Parse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}
