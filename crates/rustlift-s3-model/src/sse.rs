//! Server-side encryption policy types.
//!
//! [`SseConfig`] is the decoded `sse_config` document section, kept close to
//! the wire; [`SseType`] names the encryption mechanism the document asked
//! for; [`SseMechanism`] is the resolved form handed to the upload path once
//! key material has been loaded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Length in bytes of a customer-provided (SSE-C) encryption key.
pub const SSE_C_KEY_LENGTH: usize = 32;

/// The `sse_config` section of a storage configuration document.
///
/// All fields are optional in the document; strict decoding rejects unknown
/// fields so stale or misspelled keys fail loudly instead of being ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SseConfig {
    /// The requested encryption mechanism (e.g. `"SSE-S3"`, `"SSE-KMS"`, `"SSE-C"`).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// KMS key identifier, required for SSE-KMS.
    #[serde(default)]
    pub kms_key_id: String,
    /// Additional KMS encryption context key/value pairs.
    #[serde(default)]
    pub kms_encryption_context: HashMap<String, String>,
    /// Path to a file holding the customer encryption key, required for SSE-C.
    #[serde(default)]
    pub encryption_key: String,
}

impl SseConfig {
    /// Returns the encryption mechanism named by the `type` field.
    #[must_use]
    pub fn sse_type(&self) -> SseType {
        SseType::from(self.kind.as_str())
    }
}

/// Server-side encryption mechanism named in a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SseType {
    /// No encryption requested.
    #[default]
    None,
    /// S3-managed keys.
    SseS3,
    /// KMS-managed keys.
    SseKms,
    /// Customer-provided keys.
    SseC,
    /// A mechanism this client does not recognize.
    Other(String),
}

impl SseType {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "",
            Self::SseS3 => "SSE-S3",
            Self::SseKms => "SSE-KMS",
            Self::SseC => "SSE-C",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for SseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for SseType {
    fn from(s: &str) -> Self {
        match s {
            "" => Self::None,
            "SSE-S3" => Self::SseS3,
            "SSE-KMS" => Self::SseKms,
            "SSE-C" => Self::SseC,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// A resolved encryption mechanism, ready to apply to uploads.
///
/// Unlike [`SseConfig`], which references key material by path, this type
/// carries the material itself. SSE-C key bytes never appear in `Debug`
/// output.
#[derive(Clone, PartialEq, Eq)]
pub enum SseMechanism {
    /// S3-managed keys.
    S3,
    /// KMS-managed keys.
    Kms {
        /// KMS key identifier.
        key_id: String,
        /// Additional encryption context key/value pairs.
        encryption_context: HashMap<String, String>,
    },
    /// Customer-provided key.
    Customer {
        /// The raw encryption key.
        key: [u8; SSE_C_KEY_LENGTH],
    },
}

impl SseMechanism {
    /// Returns the mechanism kind, matching the document `type` values.
    #[must_use]
    pub fn kind(&self) -> SseType {
        match self {
            Self::S3 => SseType::SseS3,
            Self::Kms { .. } => SseType::SseKms,
            Self::Customer { .. } => SseType::SseC,
        }
    }
}

impl std::fmt::Debug for SseMechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::S3 => f.debug_struct("S3").finish(),
            Self::Kms {
                key_id,
                encryption_context,
            } => f
                .debug_struct("Kms")
                .field("key_id", key_id)
                .field("encryption_context", encryption_context)
                .finish(),
            Self::Customer { .. } => f
                .debug_struct("Customer")
                .field("key", &"[REDACTED]")
                .finish(),
        }
    }
}
