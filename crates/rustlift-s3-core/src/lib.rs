//! Resilient upload path for S3-compatible object stores.
//!
//! This crate decodes and validates a storage configuration, resolves its
//! server-side encryption policy, and uploads objects with bounded
//! retry-and-backoff when the backend signals overload. The backend itself
//! stays behind the [`ObjectUploader`] trait so any SDK or transport can
//! plug in.
//!
//! # Architecture
//!
//! ```text
//! parse_config (strict YAML decode)
//!        |
//!        v
//! validate_config / resolve_sse
//!        |
//!        v
//! UploadClient ---> try_upload (bounded retry, fixed backoff, cancellation)
//!        |
//!        v
//! ObjectUploader (SDK-backed implementation supplied by the caller)
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod sse;
pub mod upload;
pub mod uploader;
pub mod validation;

pub use client::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BACKOFF, UploadClient};
pub use config::{HttpConfig, S3Config, parse_config};
pub use error::{ConfigError, ConfigResult, UploadError, UploadResult};
pub use upload::try_upload;
pub use uploader::ObjectUploader;
