//! Data model for the RustLift S3 upload client.
//!
//! Pure types shared across the workspace: the server-side encryption policy
//! ([`SseConfig`], [`SseType`], [`SseMechanism`]), upload values
//! ([`UploadPayload`], [`PutOptions`], [`Credentials`]), configuration
//! scalars ([`ConfigDuration`]), and the structured backend error
//! ([`StoreError`]). No I/O happens in this crate.

pub mod error;
pub mod sse;
pub mod types;

pub use error::{StoreError, StoreErrorCode};
pub use sse::{SSE_C_KEY_LENGTH, SseConfig, SseMechanism, SseType};
pub use types::{ConfigDuration, Credentials, DurationParseError, PutOptions, UploadPayload};
