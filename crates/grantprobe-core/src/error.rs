//! Error types for the probing protocol.
//!
//! [`ApiError`] is the raw detail of a failed collaborator call. It never
//! escapes a component on its own: the provisioner and prober fold it into a
//! [`crate::BucketStatus`] or [`crate::Verdict`]. [`ProbeError`] covers the
//! few conditions that end a run.

use std::path::PathBuf;

/// Detail of a failed object-storage or identity call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}{message}", .code.as_ref().map(|c| format!("{c}: ")).unwrap_or_default())]
pub struct ApiError {
    /// Service error code, when the service returned one.
    pub code: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl ApiError {
    /// An error carrying a service error code.
    #[must_use]
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// An error raised locally or by the transport, with no service code.
    #[must_use]
    pub fn local(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

/// Conditions that terminate a run.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The invoking credentials could not be used.
    #[error("Error checking AWS credentials; no emails were probed")]
    InvalidSession,

    /// The bucket did not exist and could not be created.
    #[error("Error creating bucket {bucket}: {source}")]
    BucketCreation {
        /// The bucket that could not be created.
        bucket: String,
        /// The underlying failure.
        source: ApiError,
    },

    /// The email list file does not exist.
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience result type for probing operations.
pub type ProbeResult<T> = Result<T, ProbeError>;
