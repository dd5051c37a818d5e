//! Resolution of SSE policies into upload-ready mechanisms.

use std::fs;
use std::path::Path;

use rustlift_s3_model::{SSE_C_KEY_LENGTH, SseConfig, SseMechanism, SseType};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Resolve an SSE policy into the mechanism applied to uploads.
///
/// `SSE-S3` and `SSE-KMS` resolve from the policy alone; `SSE-C` reads its
/// key material from the configured file, which must hold exactly
/// [`SSE_C_KEY_LENGTH`] bytes. Mechanisms this client does not recognize
/// resolve to `None`: the upload proceeds without encryption.
///
/// # Errors
///
/// Returns [`ConfigError::EncryptionKeyFile`] when the SSE-C key file cannot
/// be read and [`ConfigError::InvalidSse`] when it holds the wrong number of
/// bytes.
pub fn resolve_sse(sse: &SseConfig) -> ConfigResult<Option<SseMechanism>> {
    match sse.sse_type() {
        SseType::None => Ok(None),
        SseType::SseS3 => Ok(Some(SseMechanism::S3)),
        SseType::SseKms => Ok(Some(SseMechanism::Kms {
            key_id: sse.kms_key_id.clone(),
            encryption_context: sse.kms_encryption_context.clone(),
        })),
        SseType::SseC => {
            let path = Path::new(&sse.encryption_key);
            let bytes = fs::read(path).map_err(|source| ConfigError::EncryptionKeyFile {
                path: path.to_path_buf(),
                source,
            })?;
            let key: [u8; SSE_C_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
                ConfigError::InvalidSse(format!(
                    "encryption_key file {} must hold exactly {SSE_C_KEY_LENGTH} bytes, got {}",
                    path.display(),
                    bytes.len()
                ))
            })?;
            Ok(Some(SseMechanism::Customer { key }))
        }
        SseType::Other(kind) => {
            debug!(sse_type = %kind, "unrecognized sse_config type, uploading without encryption");
            Ok(None)
        }
    }
}
