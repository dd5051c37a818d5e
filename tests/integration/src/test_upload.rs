//! End-to-end upload tests over a live S3-compatible endpoint.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use rustlift_s3_core::{UploadClient, UploadError};
    use rustlift_s3_model::{StoreErrorCode, UploadPayload};
    use tokio_util::sync::CancellationToken;

    use crate::{SdkUploader, cleanup_bucket, create_test_bucket, test_config, test_object_key};

    #[tokio::test]
    #[ignore = "requires a reachable S3 endpoint"]
    async fn test_should_upload_and_read_back_object() {
        let mut config = test_config();
        let uploader = SdkUploader::connect(&config).await;
        let bucket = create_test_bucket(uploader.client(), "upload").await;
        config.bucket = bucket.clone();

        let client = UploadClient::new(config, Arc::new(uploader.clone())).expect("valid config");
        let key = test_object_key("greeting");
        let body = Bytes::from_static(b"hello from rustlift");

        let remaining = client
            .upload(&CancellationToken::new(), &key, &UploadPayload::new(body.clone()))
            .await
            .expect("upload");
        tracing::info!(%bucket, %key, remaining, "uploaded");
        assert_eq!(remaining, 2, "a clean upload should keep its retry budget");

        let resp = uploader
            .client()
            .get_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .await
            .expect("get_object");
        let data = resp
            .body
            .collect()
            .await
            .expect("collect body")
            .into_bytes();
        assert_eq!(data, body);

        cleanup_bucket(uploader.client(), &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires a reachable S3 endpoint"]
    async fn test_should_attach_configured_user_metadata() {
        let mut config = test_config();
        config
            .put_user_metadata
            .insert("origin".to_owned(), "rustlift-integration".to_owned());
        let uploader = SdkUploader::connect(&config).await;
        let bucket = create_test_bucket(uploader.client(), "meta").await;
        config.bucket = bucket.clone();

        let client = UploadClient::new(config, Arc::new(uploader.clone())).expect("valid config");
        let key = test_object_key("tagged");
        client
            .upload(
                &CancellationToken::new(),
                &key,
                &UploadPayload::from(&b"tagged payload"[..]),
            )
            .await
            .expect("upload");

        let resp = uploader
            .client()
            .head_object()
            .bucket(&bucket)
            .key(&key)
            .send()
            .await
            .expect("head_object");
        let metadata = resp.metadata().expect("metadata should be present");
        assert_eq!(
            metadata.get("origin").map(String::as_str),
            Some("rustlift-integration")
        );

        cleanup_bucket(uploader.client(), &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires a reachable S3 endpoint"]
    async fn test_should_fail_fast_when_bucket_is_missing() {
        let mut config = test_config();
        config.bucket = crate::test_bucket_name("absent");
        let uploader = SdkUploader::connect(&config).await;

        let client = UploadClient::new(config, Arc::new(uploader)).expect("valid config");
        let err = client
            .upload(
                &CancellationToken::new(),
                "orphan",
                &UploadPayload::from(&b"x"[..]),
            )
            .await
            .expect_err("upload into a missing bucket should fail");

        match err {
            UploadError::Store(store) => {
                assert_eq!(store.code, StoreErrorCode::NoSuchBucket);
                assert!(!store.is_throttling(), "missing bucket must not be retried");
            }
            other => panic!("expected a store error, got {other}"),
        }
    }
}
