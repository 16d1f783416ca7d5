use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured body of a failed response
///
/// Only ever built from a body that parses as this shape. Anything else
/// ends up as [`ApiError::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    /// HTTP status code reported by the server
    #[serde(alias = "status_code")]
    pub status_code: u16,
    /// Human-readable description
    pub message: String,
    /// Machine-readable error token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(token) => write!(f, "{} {token}: {}", self.status_code, self.message),
            None => write!(f, "{}: {}", self.status_code, self.message),
        }
    }
}

/// The two failure kinds a caller can observe
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server rejected the request with a structured error body
    #[error("HTTP error {0}")]
    Http(ErrorPayload),

    /// Anything that is not a structured HTTP error
    ///
    /// The cause is kept for diagnostics only and is reachable through
    /// [`std::error::Error::source`].
    #[error("unknown error")]
    Unknown {
        #[source]
        cause: Option<Cause>,
    },
}

impl ApiError {
    /// Unknown failure with a diagnostic cause attached
    pub fn unknown(cause: impl Into<Cause>) -> Self {
        Self::Unknown {
            cause: Some(cause.into()),
        }
    }

    /// Structured payload, if this is an HTTP error
    pub const fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Http(payload) => Some(payload),
            Self::Unknown { .. } => None,
        }
    }

    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }

    /// Diagnostic cause of an unknown failure
    pub const fn cause(&self) -> Option<&Cause> {
        match self {
            Self::Unknown { cause } => cause.as_ref(),
            Self::Http(_) => None,
        }
    }
}

/// Why a failure collapsed to [`ApiError::Unknown`]
#[derive(Debug, Error)]
pub enum Cause {
    /// Transport failed and there was no body to interpret
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Transport failed and the body was not a structured payload
    #[error("{transport}; error body is not a structured payload")]
    UnreadableErrorBody {
        transport: TransportError,
        #[source]
        source: serde_json::Error,
    },

    /// Success body could not be turned into the target type
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failures while producing the success value
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty success body for a target type with no empty value
    #[error("empty body with status {status} and the target type has no empty value")]
    MissingBody { status: StatusCode },

    /// Two keys became the same name after key conversion
    #[error("key `{key}` appears twice after key conversion")]
    DuplicateKey { key: String },

    /// Transport reported success but handed back no response
    #[error("transport reported success without a response")]
    MissingResponse,
}

/// Failures reported by a transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// Status outside the success range
    #[error("unacceptable status code {status}")]
    Status { status: StatusCode },

    /// Empty body on a status that does not allow one
    #[error("empty body is not allowed for status {status}")]
    EmptyBody { status: StatusCode },

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    /// Failed while reading the response body
    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("transport error: {0}")]
    Other(String),
}
