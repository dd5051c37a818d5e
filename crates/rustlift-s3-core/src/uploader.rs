//! The backend capability consumed by the upload path.

use async_trait::async_trait;
use rustlift_s3_model::{PutOptions, StoreError, UploadPayload};

/// A backend capable of storing one object per call.
///
/// Implementations wrap a concrete SDK or transport. The trait is object
/// safe so callers can share an implementation as `Arc<dyn ObjectUploader>`.
///
/// Implementations must not retry internally; retry policy belongs to the
/// caller, which relies on [`StoreError::is_throttling`] to classify
/// failures.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use rustlift_s3_core::ObjectUploader;
/// use rustlift_s3_model::{PutOptions, StoreError, UploadPayload};
///
/// struct NullUploader;
///
/// #[async_trait]
/// impl ObjectUploader for NullUploader {
///     async fn put_object(
///         &self,
///         _bucket: &str,
///         _key: &str,
///         _payload: UploadPayload,
///         _options: &PutOptions,
///     ) -> Result<(), StoreError> {
///         Ok(())
///     }
/// }
///
/// tokio_test::block_on(async {
///     let payload = UploadPayload::from(vec![1u8, 2, 3]);
///     let result = NullUploader
///         .put_object("bucket", "key", payload, &PutOptions::default())
///         .await;
///     assert!(result.is_ok());
/// });
/// ```
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    /// Store `payload` under `key` in `bucket`, applying every field of
    /// `options`.
    ///
    /// The payload carries its own length; implementations needing a size up
    /// front read [`UploadPayload::len`].
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        payload: UploadPayload,
        options: &PutOptions,
    ) -> Result<(), StoreError>;
}
