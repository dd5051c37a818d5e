//! Structured errors reported by object-store backends.

use std::fmt;

/// Well-known error codes an S3-compatible backend may return.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StoreErrorCode {
    /// AccessDenied error.
    AccessDenied,
    /// EntityTooLarge error.
    EntityTooLarge,
    /// InternalError error.
    InternalError,
    /// InvalidArgument error.
    InvalidArgument,
    /// InvalidBucketName error.
    InvalidBucketName,
    /// NoSuchBucket error.
    NoSuchBucket,
    /// NoSuchKey error.
    NoSuchKey,
    /// SignatureDoesNotMatch error.
    SignatureDoesNotMatch,
    /// SlowDown error (backend asks clients to reduce request rate).
    SlowDown,
    /// TooManyRequests error.
    TooManyRequests,
    /// A backend error code not in the standard set.
    Custom(String),
}

impl StoreErrorCode {
    /// Returns the error code as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AccessDenied => "AccessDenied",
            Self::EntityTooLarge => "EntityTooLarge",
            Self::InternalError => "InternalError",
            Self::InvalidArgument => "InvalidArgument",
            Self::InvalidBucketName => "InvalidBucketName",
            Self::NoSuchBucket => "NoSuchBucket",
            Self::NoSuchKey => "NoSuchKey",
            Self::SignatureDoesNotMatch => "SignatureDoesNotMatch",
            Self::SlowDown => "SlowDown",
            Self::TooManyRequests => "TooManyRequests",
            Self::Custom(s) => s,
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::EntityTooLarge | Self::InvalidArgument | Self::InvalidBucketName => {
                http::StatusCode::BAD_REQUEST
            }
            Self::AccessDenied | Self::SignatureDoesNotMatch => http::StatusCode::FORBIDDEN,
            Self::NoSuchBucket | Self::NoSuchKey => http::StatusCode::NOT_FOUND,
            Self::TooManyRequests => http::StatusCode::TOO_MANY_REQUESTS,
            Self::SlowDown => http::StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError | Self::Custom(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the default message for this error.
    #[must_use]
    pub fn default_message(&self) -> &str {
        match self {
            Self::AccessDenied => "Access Denied",
            Self::EntityTooLarge => "Your proposed upload exceeds the maximum allowed size",
            Self::InternalError => "Internal server error",
            Self::InvalidArgument => "Invalid Argument",
            Self::InvalidBucketName => "The specified bucket is not valid",
            Self::NoSuchBucket => "The specified bucket does not exist",
            Self::NoSuchKey => "The specified key does not exist",
            Self::SignatureDoesNotMatch => "The request signature does not match",
            Self::SlowDown => "Please reduce your request rate",
            Self::TooManyRequests => "Too many requests",
            Self::Custom(s) => s,
        }
    }

    /// Returns true if this code signals backend throttling.
    #[must_use]
    pub fn is_throttling(&self) -> bool {
        matches!(self, Self::SlowDown | Self::TooManyRequests)
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StoreErrorCode {
    fn from(s: &str) -> Self {
        match s {
            "AccessDenied" => Self::AccessDenied,
            "EntityTooLarge" => Self::EntityTooLarge,
            "InternalError" => Self::InternalError,
            "InvalidArgument" => Self::InvalidArgument,
            "InvalidBucketName" => Self::InvalidBucketName,
            "NoSuchBucket" => Self::NoSuchBucket,
            "NoSuchKey" => Self::NoSuchKey,
            "SignatureDoesNotMatch" => Self::SignatureDoesNotMatch,
            "SlowDown" => Self::SlowDown,
            "TooManyRequests" => Self::TooManyRequests,
            other => Self::Custom(other.to_owned()),
        }
    }
}

/// An error returned by an object-store backend.
///
/// Carries the backend's error code, the HTTP status observed on the wire
/// (when one was observed), a human-readable message, and an optional source
/// error from the underlying transport or SDK.
#[derive(Debug)]
pub struct StoreError {
    /// The backend error code.
    pub code: StoreErrorCode,
    /// The HTTP status observed on the wire, if any.
    pub status: Option<http::StatusCode>,
    /// A human-readable error message.
    pub message: String,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl StoreError {
    /// Create a new StoreError from an error code.
    #[must_use]
    pub fn new(code: StoreErrorCode) -> Self {
        let message = code.default_message().to_owned();
        Self {
            code,
            status: None,
            message,
            source: None,
        }
    }

    /// Create a new StoreError with a custom message.
    #[must_use]
    pub fn with_message(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            status: None,
            message: message.into(),
            source: None,
        }
    }

    /// Set the HTTP status observed on the wire.
    #[must_use]
    pub fn with_status(mut self, status: http::StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the HTTP status for this error, observed or derived from the code.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        self.status.unwrap_or_else(|| self.code.default_status_code())
    }

    /// Returns true if this error signals backend throttling.
    ///
    /// Throttling is reported either through a dedicated error code
    /// (`SlowDown`, `TooManyRequests`) or through the HTTP status alone
    /// (503, 429) when the backend sends no structured code.
    #[must_use]
    pub fn is_throttling(&self) -> bool {
        if self.code.is_throttling() {
            return true;
        }
        matches!(
            self.status,
            Some(http::StatusCode::SERVICE_UNAVAILABLE | http::StatusCode::TOO_MANY_REQUESTS)
        )
    }

    /// Create a SlowDown error.
    #[must_use]
    pub fn slow_down() -> Self {
        Self::new(StoreErrorCode::SlowDown).with_status(http::StatusCode::SERVICE_UNAVAILABLE)
    }

    /// Create a NoSuchBucket error.
    #[must_use]
    pub fn no_such_bucket(bucket: impl Into<String>) -> Self {
        Self::with_message(
            StoreErrorCode::NoSuchBucket,
            format!("The specified bucket does not exist: {}", bucket.into()),
        )
    }

    /// Create an AccessDenied error.
    #[must_use]
    pub fn access_denied(resource: impl Into<String>) -> Self {
        Self::with_message(
            StoreErrorCode::AccessDenied,
            format!("Access Denied: {}", resource.into()),
        )
    }

    /// Create an InternalError error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(StoreErrorCode::InternalError, message)
    }
}

/// Create a StoreError from an error code.
///
/// # Examples
///
/// ```
/// use rustlift_s3_model::store_error;
/// use rustlift_s3_model::error::StoreErrorCode;
///
/// let err = store_error!(SlowDown);
/// assert_eq!(err.code, StoreErrorCode::SlowDown);
///
/// let err = store_error!(NoSuchKey, "The key does not exist");
/// assert_eq!(err.message, "The key does not exist");
/// ```
#[macro_export]
macro_rules! store_error {
    ($code:ident) => {
        $crate::error::StoreError::new($crate::error::StoreErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::StoreError::with_message($crate::error::StoreErrorCode::$code, $msg)
    };
}
