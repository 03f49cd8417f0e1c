//! Error types for publit-production
//!
//! One [`Error`] enum covers the whole crate. Batch operations never return a
//! per-item failure through `Err`; those land in a [`crate::BatchReport`] keyed
//! by file id, and only precondition failures surface as a top-level error.

use crate::types::FileId;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publit-production operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for publit-production
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "base_url")
        key: Option<String>,
    },

    /// Transport-level failure (connect, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The Production API answered with a non-OK status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status returned by the API
        status: u16,
        /// Message taken from the error body, or a generic description
        message: String,
    },

    /// A presigned download answered with something other than 200 OK
    #[error("could not download file, server responded with code: {status}")]
    UnexpectedStatus {
        /// HTTP status returned by the storage host
        status: u16,
    },

    /// The output directory is missing or not a directory
    #[error("output dir {path} is not a directory")]
    InvalidDestination {
        /// The path that failed the check
        path: PathBuf,
    },

    /// A file's original name cannot be used as a file name inside the output dir
    #[error("file {id} has an unusable original name {name:?}")]
    InvalidFileName {
        /// The file whose name was rejected
        id: FileId,
        /// The rejected name
        name: String,
    },

    /// The API returned a file without the requested presigned URL
    #[error("no presigned url returned for file {id}")]
    MissingPresignedUrl {
        /// The file lacking a presigned URL
        id: FileId,
    },

    /// Download skipped because presigned URL resolution failed for part of the batch
    #[error("download aborted: presigned url resolution failed for {} file(s)", failed.len())]
    BatchAborted {
        /// Files whose resolution failed
        failed: Vec<FileId>,
    },

    /// A worker stopped before reporting an outcome for this item
    #[error("worker exited before reporting an outcome")]
    WorkerLost,

    /// Operation requires a stored resource (id must be set)
    #[error("cannot {operation} a {resource} that has no id")]
    MissingId {
        /// Resource kind (e.g., "delivery number")
        resource: &'static str,
        /// The attempted operation (e.g., "update")
        operation: &'static str,
    },

    /// Operation requires a new resource (id must be unset)
    #[error("cannot store {resource} {id}: it already exists")]
    AlreadyStored {
        /// Resource kind (e.g., "status")
        resource: &'static str,
        /// The id that was already set
        id: i64,
    },

    /// The API answered 200 but the body did not contain what was expected
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL could not be built
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>, key: Option<&str>) -> Self {
        Self::Config {
            message: message.into(),
            key: key.map(str::to_string),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedStatus { status } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error body returned by the Production API on failed requests
///
/// Only some failures carry a body; fields are optional so partial bodies still decode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Short error message
    #[serde(default)]
    pub message: Option<String>,
    /// Machine-readable error code
    #[serde(default)]
    pub code: Option<String>,
    /// Detailed errors (validation failures and similar)
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ApiErrorResponse {
    /// Whether the body contains anything worth reporting
    pub fn has_information(&self) -> bool {
        self.message.as_deref().is_some_and(|m| !m.is_empty()) || !self.errors.is_empty()
    }

    /// Render the body as a single message
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(code) = self.code.as_deref().filter(|c| !c.is_empty()) {
            parts.push(format!("[{}]", code));
        }
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            parts.push(message.to_string());
        }
        if !self.errors.is_empty() {
            parts.push(self.errors.join("; "));
        }
        parts.join(" ")
    }

    /// Convert into an [`Error::Api`] for the given status
    pub fn into_error(self, status: StatusCode) -> Error {
        Error::Api {
            status: status.as_u16(),
            message: self.describe(),
        }
    }
}
