//! Error types for the configuration and upload paths.
//!
//! Configuration problems ([`ConfigError`]) are detected before any upload
//! starts; upload problems ([`UploadError`]) carry the structured
//! [`StoreError`] reported by the backend so callers can inspect codes and
//! HTTP statuses.

use std::io;
use std::path::PathBuf;

use rustlift_s3_model::StoreError;

/// Errors from decoding, validating, or resolving a storage configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be decoded. Unknown fields, including stale
    /// settings from older versions, fail here.
    #[error("failed to decode storage config: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// A structural rule on the decoded configuration failed.
    #[error("invalid storage config: {0}")]
    InvalidConfig(String),

    /// A structural rule on the `sse_config` section failed.
    #[error("invalid sse_config: {0}")]
    InvalidSse(String),

    /// The SSE-C encryption key file could not be read.
    #[error("failed to read encryption_key file {}", path.display())]
    EncryptionKeyFile {
        /// Path of the unreadable key file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Errors from an upload attempt sequence.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The backend rejected the upload with a non-retryable error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Every permitted attempt was throttled by the backend.
    #[error("upload retry budget exhausted after {attempts} attempts")]
    RetryBudgetExhausted {
        /// Total attempts made (the initial try plus every retry).
        attempts: u32,
        /// The last throttling error observed.
        #[source]
        source: StoreError,
    },

    /// The operation was canceled before it could complete.
    #[error("upload canceled")]
    Canceled,
}

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience result type for upload operations.
pub type UploadResult<T> = Result<T, UploadError>;
