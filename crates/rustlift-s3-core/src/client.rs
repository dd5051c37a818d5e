//! Shareable upload client facade.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rustlift_s3_model::{PutOptions, SseMechanism, UploadPayload};
use tokio_util::sync::CancellationToken;

use crate::config::S3Config;
use crate::error::{ConfigResult, UploadResult};
use crate::sse::resolve_sse;
use crate::upload::try_upload;
use crate::uploader::ObjectUploader;
use crate::validation::validate_config;

/// Default number of retries permitted after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default fixed backoff between throttled attempts.
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(100);

/// A validated, shareable handle for uploading objects to one bucket.
///
/// Construction validates the configuration and resolves its SSE policy
/// once, including reading SSE-C key material from disk. Afterwards the
/// client is immutable: any number of tasks may call
/// [`UploadClient::upload`] concurrently through a shared reference or a
/// clone.
#[derive(Clone)]
pub struct UploadClient {
    config: Arc<S3Config>,
    store: Arc<dyn ObjectUploader>,
    sse: Option<SseMechanism>,
    max_retries: u32,
    retry_backoff: Duration,
}

impl fmt::Debug for UploadClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadClient")
            .field("bucket", &self.config.bucket)
            .field("sse", &self.sse)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .finish_non_exhaustive()
    }
}

impl UploadClient {
    /// Create a client over `store` from a decoded configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::ConfigError`] when the configuration fails
    /// validation or its SSE policy cannot be resolved. No upload runs until
    /// both have succeeded.
    pub fn new(config: S3Config, store: Arc<dyn ObjectUploader>) -> ConfigResult<Self> {
        validate_config(&config)?;
        let sse = resolve_sse(&config.sse_config)?;
        Ok(Self {
            config: Arc::new(config),
            store,
            sse,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    /// Set the number of retries permitted after the initial attempt.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the fixed backoff between throttled attempts.
    #[must_use]
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Returns the resolved SSE mechanism, if any.
    #[must_use]
    pub fn sse(&self) -> Option<&SseMechanism> {
        self.sse.as_ref()
    }

    /// Assemble the per-request options applied to every upload.
    #[must_use]
    pub fn put_options(&self) -> PutOptions {
        PutOptions {
            user_metadata: self.config.put_user_metadata.clone(),
            part_size: self.config.part_size,
            sse: self.sse.clone(),
        }
    }

    /// Upload one object to the configured bucket.
    ///
    /// Delegates to [`try_upload`] with the configured retry settings; the
    /// return value is the retry budget left after the attempt that
    /// succeeded.
    ///
    /// # Errors
    ///
    /// See [`try_upload`].
    pub async fn upload(
        &self,
        cancel: &CancellationToken,
        key: &str,
        payload: &UploadPayload,
    ) -> UploadResult<i64> {
        let options = self.put_options();
        try_upload(
            cancel,
            self.store.as_ref(),
            &self.config.bucket,
            key,
            payload,
            &options,
            self.max_retries,
            self.retry_backoff,
        )
        .await
    }
}
