//! Bounded retry-and-backoff for object uploads.

use std::time::Duration;

use rustlift_s3_model::{PutOptions, UploadPayload};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{UploadError, UploadResult};
use crate::uploader::ObjectUploader;

/// Upload one object, retrying on backend throttling.
///
/// Makes up to `max_retries + 1` strictly sequential attempts. Only
/// throttling failures consume retry budget; any other failure returns
/// immediately without sleeping. Between throttled attempts the task waits
/// for `backoff`, racing the wait against `cancel`.
///
/// On success the return value is the retry budget left after the attempt
/// that succeeded: `max_retries - attempt - 1` with `attempt` counted from
/// zero. Success on the last permitted attempt therefore returns `-1`,
/// including the single-attempt case where `max_retries` is zero.
///
/// # Errors
///
/// Returns [`UploadError::Store`] on a non-retryable backend failure,
/// [`UploadError::RetryBudgetExhausted`] when every permitted attempt was
/// throttled, and [`UploadError::Canceled`] when `cancel` fires before an
/// attempt or backoff completes.
#[allow(clippy::too_many_arguments)]
pub async fn try_upload<U>(
    cancel: &CancellationToken,
    store: &U,
    bucket: &str,
    key: &str,
    payload: &UploadPayload,
    options: &PutOptions,
    max_retries: u32,
    backoff: Duration,
) -> UploadResult<i64>
where
    U: ObjectUploader + ?Sized,
{
    for attempt in 0..=max_retries {
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(UploadError::Canceled),
            result = store.put_object(bucket, key, payload.clone(), options) => result,
        };

        let err = match result {
            Ok(()) => {
                debug!(bucket = %bucket, key = %key, attempt, "upload completed");
                return Ok(i64::from(max_retries) - i64::from(attempt) - 1);
            }
            Err(err) => err,
        };

        if !err.is_throttling() {
            return Err(UploadError::Store(err));
        }

        if attempt == max_retries {
            warn!(
                bucket = %bucket,
                key = %key,
                attempts = max_retries + 1,
                "upload retry budget exhausted"
            );
            return Err(UploadError::RetryBudgetExhausted {
                attempts: max_retries + 1,
                source: err,
            });
        }

        warn!(
            bucket = %bucket,
            key = %key,
            attempt,
            backoff = ?backoff,
            "backend throttled upload, backing off"
        );
        tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(UploadError::Canceled),
            () = tokio::time::sleep(backoff) => {}
        }
    }

    unreachable!("the attempt loop always returns")
}
