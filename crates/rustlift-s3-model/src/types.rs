//! Shared value types for the upload path.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sse::SseMechanism;

/// A wrapper around `bytes::Bytes` carrying an object body.
///
/// Cloning is cheap, so the same payload can be re-sent across retry
/// attempts without copying the body.
#[derive(Debug, Clone, Default)]
pub struct UploadPayload {
    /// The underlying bytes data.
    pub data: bytes::Bytes,
}

impl UploadPayload {
    /// Create a new `UploadPayload` from bytes.
    #[must_use]
    pub fn new(data: impl Into<bytes::Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the length of the payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl From<bytes::Bytes> for UploadPayload {
    fn from(data: bytes::Bytes) -> Self {
        Self { data }
    }
}

impl From<Vec<u8>> for UploadPayload {
    fn from(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }
}

impl From<&[u8]> for UploadPayload {
    fn from(data: &[u8]) -> Self {
        Self {
            data: bytes::Bytes::copy_from_slice(data),
        }
    }
}

/// Per-request options applied to an object PUT.
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// User metadata attached to the object (`X-Amz-Meta-*` and ACL headers).
    pub user_metadata: HashMap<String, String>,
    /// Part size in bytes for uploads large enough to be split.
    pub part_size: u64,
    /// Server-side encryption to apply, if any.
    pub sse: Option<SseMechanism>,
}

/// Static credentials for an object-store backend.
#[derive(Clone, Default)]
pub struct Credentials {
    /// The access key ID.
    pub access_key: String,
    /// The secret access key.
    pub secret_key: String,
    /// Optional session token for temporary credentials.
    pub session_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// A duration decoded from a configuration document.
///
/// Documents spell durations as a number with a unit suffix (`"90s"`, `"2m"`,
/// `"150ms"`, `"1h30m"`); this type parses that form and renders it back the
/// same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigDuration(Duration);

impl ConfigDuration {
    /// Wrap an existing [`Duration`].
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// Create a duration from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Create a duration from whole milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Returns the wrapped [`Duration`].
    #[must_use]
    pub const fn get(self) -> Duration {
        self.0
    }
}

impl From<Duration> for ConfigDuration {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl From<ConfigDuration> for Duration {
    fn from(duration: ConfigDuration) -> Self {
        duration.0
    }
}

impl fmt::Display for ConfigDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        if d.is_zero() {
            return f.write_str("0s");
        }
        if d.subsec_nanos() == 0 {
            let secs = d.as_secs();
            if secs % 3600 == 0 {
                return write!(f, "{}h", secs / 3600);
            }
            if secs % 60 == 0 {
                return write!(f, "{}m", secs / 60);
            }
            return write!(f, "{secs}s");
        }
        write!(f, "{}ms", d.as_millis())
    }
}

impl std::str::FromStr for ConfigDuration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(DurationParseError::new(s, "empty duration"));
        }
        if input == "0" {
            return Ok(Self(Duration::ZERO));
        }

        let mut total = Duration::ZERO;
        let mut rest = input;
        while !rest.is_empty() {
            let digits_end = rest
                .find(|c: char| !c.is_ascii_digit())
                .ok_or_else(|| DurationParseError::new(s, "missing unit suffix"))?;
            if digits_end == 0 {
                return Err(DurationParseError::new(s, "expected a number"));
            }
            let (digits, tail) = rest.split_at(digits_end);
            let value: u64 = digits
                .parse()
                .map_err(|_| DurationParseError::new(s, "number out of range"))?;

            // "ms" must be tried before "m".
            let (segment, tail) = if let Some(t) = tail.strip_prefix("ms") {
                (Some(Duration::from_millis(value)), t)
            } else if let Some(t) = tail.strip_prefix('s') {
                (Some(Duration::from_secs(value)), t)
            } else if let Some(t) = tail.strip_prefix('m') {
                (value.checked_mul(60).map(Duration::from_secs), t)
            } else if let Some(t) = tail.strip_prefix('h') {
                (value.checked_mul(3600).map(Duration::from_secs), t)
            } else {
                return Err(DurationParseError::new(s, "unknown unit suffix"));
            };
            let segment = segment.ok_or_else(|| DurationParseError::new(s, "duration overflows"))?;

            total = total
                .checked_add(segment)
                .ok_or_else(|| DurationParseError::new(s, "duration overflows"))?;
            rest = tail;
        }

        Ok(Self(total))
    }
}

impl Serialize for ConfigDuration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConfigDuration {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when a duration string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationParseError {
    input: String,
    reason: &'static str,
}

impl DurationParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_owned(),
            reason,
        }
    }
}

impl fmt::Display for DurationParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid duration {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for DurationParseError {}
