//! Storage configuration for S3-compatible object stores.
//!
//! [`S3Config`] mirrors the YAML document accepted by [`parse_config`].
//! Decoding is strict: unknown fields anywhere in the document are rejected,
//! so stale settings from older versions (such as the removed
//! `see_encryption` flag) fail loudly instead of being silently ignored.

use std::collections::HashMap;

use rustlift_s3_model::{ConfigDuration, Credentials, SseConfig};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::ConfigResult;

/// Default part size for uploads: 128 MiB.
pub const DEFAULT_PART_SIZE: u64 = 1024 * 1024 * 128;

/// Default idle connection timeout (90 seconds).
pub const DEFAULT_IDLE_CONN_TIMEOUT: ConfigDuration = ConfigDuration::from_secs(90);

/// Default response header timeout (2 minutes).
pub const DEFAULT_RESPONSE_HEADER_TIMEOUT: ConfigDuration = ConfigDuration::from_secs(120);

/// Storage configuration for one bucket.
///
/// All fields have defaults, so a minimal document only names the bucket and
/// endpoint. [`S3Config::builder`] constructs the same values
/// programmatically.
///
/// # Examples
///
/// ```
/// use rustlift_s3_core::config::{DEFAULT_PART_SIZE, S3Config, parse_config};
///
/// let config = parse_config(b"bucket: data\nendpoint: s3.example.com\n").unwrap();
/// assert_eq!(config.bucket, "data");
/// assert_eq!(config.part_size, DEFAULT_PART_SIZE);
///
/// let built = S3Config::builder().bucket("data".to_owned()).build();
/// assert_eq!(built.part_size, config.part_size);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(deny_unknown_fields)]
pub struct S3Config {
    /// Target bucket name.
    #[builder(default)]
    #[serde(default)]
    pub bucket: String,

    /// Backend endpoint (host or host:port).
    #[builder(default)]
    #[serde(default)]
    pub endpoint: String,

    /// Region hint for endpoints that need one.
    #[builder(default)]
    #[serde(default)]
    pub region: String,

    /// Static access key ID. Empty selects ambient credential resolution.
    #[builder(default)]
    #[serde(default)]
    pub access_key: String,

    /// Static secret key, paired with `access_key`.
    #[builder(default)]
    #[serde(default)]
    pub secret_key: String,

    /// Session token for temporary credentials. Empty means none.
    #[builder(default)]
    #[serde(default)]
    pub session_token: String,

    /// Use plain HTTP instead of HTTPS.
    #[builder(default)]
    #[serde(default)]
    pub insecure: bool,

    /// Sign requests with the legacy v2 signature algorithm.
    #[builder(default)]
    #[serde(default)]
    pub signature_version2: bool,

    /// User metadata attached to every uploaded object. Always present,
    /// defaulting to an empty map.
    #[builder(default)]
    #[serde(default)]
    pub put_user_metadata: HashMap<String, String>,

    /// HTTP transport tuning.
    #[builder(default)]
    #[serde(default)]
    pub http_config: HttpConfig,

    /// Part size in bytes for uploads large enough to be split. Zero or
    /// omitted selects [`DEFAULT_PART_SIZE`].
    #[builder(default = DEFAULT_PART_SIZE)]
    #[serde(default = "default_part_size")]
    pub part_size: u64,

    /// Object listing API version hint. Empty selects the backend default.
    #[builder(default)]
    #[serde(default)]
    pub list_objects_version: String,

    /// Server-side encryption policy.
    #[builder(default)]
    #[serde(default)]
    pub sse_config: SseConfig,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            endpoint: String::new(),
            region: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            session_token: String::new(),
            insecure: false,
            signature_version2: false,
            put_user_metadata: HashMap::new(),
            http_config: HttpConfig::default(),
            part_size: DEFAULT_PART_SIZE,
            list_objects_version: String::new(),
            sse_config: SseConfig::default(),
        }
    }
}

impl S3Config {
    /// Returns the static credentials from this configuration.
    ///
    /// `None` when no access key is set, signalling that the uploader should
    /// resolve credentials from its environment instead.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        if self.access_key.is_empty() {
            return None;
        }
        Some(Credentials {
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            session_token: (!self.session_token.is_empty()).then(|| self.session_token.clone()),
        })
    }
}

/// HTTP transport tuning for the storage client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// How long an idle connection may sit in the pool before being closed.
    #[builder(default = DEFAULT_IDLE_CONN_TIMEOUT)]
    #[serde(default = "default_idle_conn_timeout")]
    pub idle_conn_timeout: ConfigDuration,

    /// How long to wait for response headers after a request is sent.
    #[builder(default = DEFAULT_RESPONSE_HEADER_TIMEOUT)]
    #[serde(default = "default_response_header_timeout")]
    pub response_header_timeout: ConfigDuration,

    /// Skip TLS certificate verification.
    #[builder(default)]
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            idle_conn_timeout: DEFAULT_IDLE_CONN_TIMEOUT,
            response_header_timeout: DEFAULT_RESPONSE_HEADER_TIMEOUT,
            insecure_skip_verify: false,
        }
    }
}

fn default_part_size() -> u64 {
    DEFAULT_PART_SIZE
}

fn default_idle_conn_timeout() -> ConfigDuration {
    DEFAULT_IDLE_CONN_TIMEOUT
}

fn default_response_header_timeout() -> ConfigDuration {
    DEFAULT_RESPONSE_HEADER_TIMEOUT
}

/// Decode a YAML configuration document.
///
/// Decoding is strict: unknown fields anywhere in the document are an error.
/// A `part_size` of zero is normalized to [`DEFAULT_PART_SIZE`] so the rest
/// of the upload path can rely on it being positive.
///
/// # Errors
///
/// Returns [`crate::error::ConfigError::Decode`] when the document is
/// malformed or contains unknown fields.
pub fn parse_config(input: &[u8]) -> ConfigResult<S3Config> {
    let mut config: S3Config = serde_yaml::from_slice(input)?;
    if config.part_size == 0 {
        config.part_size = DEFAULT_PART_SIZE;
    }
    Ok(config)
}
