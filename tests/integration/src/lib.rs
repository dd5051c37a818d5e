//! Integration tests for the rustlift upload path.
//!
//! These tests drive [`UploadClient`](rustlift_s3_core::UploadClient) through
//! the real AWS SDK against an S3-compatible endpoint (MinIO, LocalStack, or
//! AWS itself). They are marked `#[ignore]` so they don't run during normal
//! `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p rustlift-integration -- --ignored
//! ```
//!
//! The target endpoint is taken from the environment: `S3_ENDPOINT`
//! (default `localhost:9000`), `S3_REGION`, `S3_ACCESS_KEY`, `S3_SECRET_KEY`,
//! and `S3_TEST_BUCKET`.

use std::sync::Once;

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ServerSideEncryption;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use md5::{Digest, Md5};
use rustlift_s3_core::{ObjectUploader, S3Config};
use rustlift_s3_model::{PutOptions, SseMechanism, StoreError, StoreErrorCode, UploadPayload};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Build a storage configuration from the environment, falling back to a
/// local MinIO-style endpoint.
#[must_use]
pub fn test_config() -> S3Config {
    S3Config::builder()
        .bucket(env_or("S3_TEST_BUCKET", "rustlift-test"))
        .endpoint(env_or("S3_ENDPOINT", "localhost:9000"))
        .region(env_or("S3_REGION", "us-east-1"))
        .access_key(env_or("S3_ACCESS_KEY", "test"))
        .secret_key(env_or("S3_SECRET_KEY", "test"))
        .insecure(true)
        .build()
}

/// [`ObjectUploader`] backed by the AWS SDK S3 client.
#[derive(Debug, Clone)]
pub struct SdkUploader {
    client: aws_sdk_s3::Client,
}

impl SdkUploader {
    /// Connect to the endpoint described by `config`.
    ///
    /// Static credentials from the config win; without them the SDK resolves
    /// credentials from its environment (profile, IMDS, and so on).
    pub async fn connect(config: &S3Config) -> Self {
        init_tracing();

        let mut builder = match config.credentials() {
            Some(creds) => aws_sdk_s3::config::Builder::new()
                .behavior_version(BehaviorVersion::latest())
                .credentials_provider(Credentials::new(
                    creds.access_key,
                    creds.secret_key,
                    creds.session_token,
                    None,
                    "rustlift-integration",
                )),
            None => {
                let shared = aws_config::defaults(BehaviorVersion::latest()).load().await;
                aws_sdk_s3::config::Builder::from(&shared)
            }
        };

        if !config.region.is_empty() {
            builder = builder.region(Region::new(config.region.clone()));
        }
        if !config.endpoint.is_empty() {
            let scheme = if config.insecure { "http" } else { "https" };
            builder = builder
                .endpoint_url(format!("{scheme}://{}", config.endpoint))
                .force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
        }
    }

    /// The underlying SDK client, for test setup and verification.
    #[must_use]
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

#[async_trait]
impl ObjectUploader for SdkUploader {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: UploadPayload,
        options: &PutOptions,
    ) -> Result<(), StoreError> {
        let mut req = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(payload.data));

        for (name, value) in &options.user_metadata {
            req = req.metadata(name, value);
        }

        match options.sse.as_ref() {
            None => {}
            Some(SseMechanism::S3) => {
                req = req.server_side_encryption(ServerSideEncryption::Aes256);
            }
            Some(SseMechanism::Kms {
                key_id,
                encryption_context,
            }) => {
                req = req
                    .server_side_encryption(ServerSideEncryption::AwsKms)
                    .ssekms_key_id(key_id);
                if !encryption_context.is_empty() {
                    let json = serde_json::to_string(encryption_context).map_err(|e| {
                        StoreError::with_message(
                            StoreErrorCode::InvalidArgument,
                            format!("failed to encode KMS encryption context: {e}"),
                        )
                    })?;
                    req = req.ssekms_encryption_context(BASE64_STANDARD.encode(json));
                }
            }
            Some(SseMechanism::Customer { key }) => {
                req = req
                    .sse_customer_algorithm("AES256")
                    .sse_customer_key(BASE64_STANDARD.encode(key))
                    .sse_customer_key_md5(BASE64_STANDARD.encode(Md5::digest(key)));
            }
        }

        req.send().await.map_err(into_store_error)?;
        Ok(())
    }
}

/// Translate an SDK put failure into a [`StoreError`], preserving the HTTP
/// status and the S3 error code so retry classification works.
fn into_store_error(err: SdkError<PutObjectError>) -> StoreError {
    let status = match &err {
        SdkError::ServiceError(ctx) => Some(ctx.raw().status().as_u16()),
        SdkError::ResponseError(ctx) => Some(ctx.raw().status().as_u16()),
        _ => None,
    };
    let code = err
        .as_service_error()
        .and_then(ProvideErrorMetadata::code)
        .map_or(StoreErrorCode::InternalError, StoreErrorCode::from);
    let message = err
        .as_service_error()
        .and_then(ProvideErrorMetadata::message)
        .map_or_else(|| err.to_string(), ToOwned::to_owned);

    let mut store = StoreError::with_message(code, message).with_source(err);
    if let Some(status) = status.and_then(|s| http::StatusCode::from_u16(s).ok()) {
        store = store.with_status(status);
    }
    store
}

/// Generate a unique object key for a test.
#[must_use]
pub fn test_object_key(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("{prefix}/{id}")
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("rustlift-{prefix}-{id}")
}

/// Create a bucket and return its name. Caller is responsible for cleanup.
pub async fn create_test_bucket(client: &aws_sdk_s3::Client, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Delete all objects in a bucket, then delete the bucket.
pub async fn cleanup_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    let mut continuation_token = None;
    loop {
        let mut req = client.list_objects_v2().bucket(bucket);
        if let Some(token) = continuation_token.take() {
            req = req.continuation_token(token);
        }
        let Ok(resp) = req.send().await else {
            return; // Bucket may not exist.
        };

        for obj in resp.contents() {
            if let Some(key) = obj.key() {
                let _ = client.delete_object().bucket(bucket).key(key).send().await;
            }
        }

        if resp.is_truncated() == Some(true) {
            continuation_token = resp.next_continuation_token().map(ToOwned::to_owned);
        } else {
            break;
        }
    }

    let _ = client.delete_bucket().bucket(bucket).send().await;
}

mod test_upload;
