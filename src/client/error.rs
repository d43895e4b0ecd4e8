use super::envelope::FieldErrors;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Shown when the backend cannot be reached at all.
pub const CONNECTIVITY_MESSAGE: &str = "Failed to reach server";
/// Used when a failed response carries no message of its own.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";
pub const UPLOAD_FAILURE_MESSAGE: &str = "Upload failed";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Failure classes surfaced on failed envelopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection or transport error; nothing came back.
    Network,
    /// HTTP 401. The session has been cleared by the time the caller sees it.
    Unauthorized,
    /// Any other 4xx. Field errors are attached when the backend sent them.
    Validation,
    /// 5xx, or a payload that could not be decoded.
    Server,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{}", CONNECTIVITY_MESSAGE)]
    Network(#[source] reqwest::Error),
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Validation {
        status: StatusCode,
        message: String,
        errors: Option<FieldErrors>,
    },
    #[error("{message}")]
    Server { status: StatusCode, message: String },
    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    Decode(#[source] serde_json::Error),
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

/// The parts of a failed response body worth keeping. Anything that does not
/// decode is treated as an empty body.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

impl ClientError {
    /// Classifies a non-2xx response. `fallback` is used when the body has no
    /// message.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &[u8], fallback: &str) -> Self {
        let ErrorBody { message, errors } = serde_json::from_slice(body).unwrap_or_default();
        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        if status == StatusCode::UNAUTHORIZED {
            Self::Unauthorized { message }
        } else if status.is_client_error() {
            Self::Validation {
                status,
                message,
                errors,
            }
        } else {
            Self::Server { status, message }
        }
    }

    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network(_) => FailureKind::Network,
            Self::Unauthorized { .. } => FailureKind::Unauthorized,
            Self::Validation { .. } => FailureKind::Validation,
            Self::Server { .. } | Self::Decode(_) | Self::Encode(_) => FailureKind::Server,
        }
    }

    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { errors, .. } => errors.as_ref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Validation { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) | Self::Encode(_) => None,
        }
    }
}
