//! Structural validation of storage configurations.
//!
//! Validation is purely observational: it inspects a decoded [`S3Config`]
//! and reports the first rule violation without mutating anything. I/O-backed
//! checks (such as reading SSE-C key material) happen later, in
//! [`crate::sse::resolve_sse`].

use rustlift_s3_model::{SseConfig, SseType};

use crate::config::S3Config;
use crate::error::ConfigError;

/// Validate a decoded configuration.
///
/// Checks run in order and the first failure wins: bucket presence,
/// credential pairing, part size, then the SSE section via [`validate_sse`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidConfig`] or [`ConfigError::InvalidSse`]
/// naming the violated rule.
///
/// # Examples
///
/// ```
/// use rustlift_s3_core::config::parse_config;
/// use rustlift_s3_core::validation::validate_config;
///
/// let config = parse_config(b"bucket: data\n").unwrap();
/// assert!(validate_config(&config).is_ok());
///
/// let config = parse_config(b"endpoint: s3.example.com\n").unwrap();
/// assert!(validate_config(&config).is_err());
/// ```
pub fn validate_config(config: &S3Config) -> Result<(), ConfigError> {
    if config.bucket.is_empty() {
        return Err(ConfigError::InvalidConfig(
            "no s3 bucket in config".to_owned(),
        ));
    }

    if config.access_key.is_empty() && !config.secret_key.is_empty() {
        return Err(ConfigError::InvalidConfig(
            "no s3 access_key specified while secret_key is present".to_owned(),
        ));
    }
    if !config.access_key.is_empty() && config.secret_key.is_empty() {
        return Err(ConfigError::InvalidConfig(
            "no s3 secret_key specified while access_key is present".to_owned(),
        ));
    }

    if config.part_size == 0 {
        return Err(ConfigError::InvalidConfig(
            "part_size must be positive".to_owned(),
        ));
    }

    validate_sse(&config.sse_config)
}

/// Validate the SSE section of a configuration.
///
/// Mechanisms this client does not recognize pass validation; they resolve
/// to no encryption at upload time rather than failing here.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSse`] when a mechanism is missing its
/// required material or carries material that does not apply to it.
pub fn validate_sse(sse: &SseConfig) -> Result<(), ConfigError> {
    match sse.sse_type() {
        SseType::SseC => {
            if sse.encryption_key.is_empty() {
                return Err(ConfigError::InvalidSse(
                    "encryption_key must be set if sse_config.type is set to 'SSE-C'".to_owned(),
                ));
            }
            if !sse.kms_key_id.is_empty() {
                return Err(ConfigError::InvalidSse(
                    "kms_key_id is not applicable if sse_config.type is set to 'SSE-C'".to_owned(),
                ));
            }
            Ok(())
        }
        SseType::SseKms => {
            if sse.kms_key_id.is_empty() {
                return Err(ConfigError::InvalidSse(
                    "kms_key_id must be set if sse_config.type is set to 'SSE-KMS'".to_owned(),
                ));
            }
            Ok(())
        }
        SseType::None | SseType::SseS3 | SseType::Other(_) => Ok(()),
    }
}
