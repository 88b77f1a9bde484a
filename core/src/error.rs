//! Error types for the Basecamp client.
//!
//! # Design
//! `Unauthorized` gets a dedicated variant because callers need to tell an
//! expired or revoked token apart from every other failed request and start
//! re-authentication. All other unexpected statuses land in `Api` with the
//! status, method and URL of the failed request. `Configuration` errors are
//! raised before any request is sent.

use thiserror::Error;

use crate::http::HttpMethod;

/// Result type alias for client operations.
pub type BasecampResult<T> = Result<T, BasecampError>;

/// Coarse classification of a `BasecampError`, for callers that branch on
/// the kind of failure rather than matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Unauthorized,
    Api,
    Transport,
    Decode,
}

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum BasecampError {
    /// Required context is missing or contradictory. Never sent over the wire.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The server answered 401.
    #[error("Got 401 error while making a {method} request on {url}.")]
    Unauthorized { method: HttpMethod, url: String },

    /// The server answered with a status the operation did not expect.
    #[error("Got {status} error while making a {method} request on {url}.")]
    Api {
        status: u16,
        method: HttpMethod,
        url: String,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response body was not JSON, or not of the expected shape.
    #[error("could not decode the response from {url}: {source}")]
    Deserialization {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BasecampError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Builds the error for an unexpected status, singling out 401.
    pub fn from_status(status: u16, method: HttpMethod, url: impl Into<String>) -> Self {
        let url = url.into();
        if status == 401 {
            return Self::Unauthorized { method, url };
        }
        Self::Api {
            status,
            method,
            url,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Api { .. } => ErrorKind::Api,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Serialization(_) | Self::Deserialization { .. } => ErrorKind::Decode,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
