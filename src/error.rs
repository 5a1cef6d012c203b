//! Error types for the spotikit client.
//!
//! Every failure a caller can observe is a variant of [`Error`]. Nothing is
//! swallowed: validation failures surface before any network traffic, auth
//! and rate-limit failures surface after their single bounded retry, and
//! everything else propagates immediately.

use std::time::Duration;

use thiserror::Error;

/// All failure modes of the client.
#[derive(Debug, Error)]
pub enum Error {
    /// A local precondition failed before any request was issued, e.g. a
    /// bulk call exceeding the provider's id limit or a parameter outside
    /// its documented range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Token acquisition or refresh failed, or the provider rejected the
    /// token twice in a row. `code` carries the provider's OAuth error code
    /// when one was supplied, or a local reason code otherwise.
    #[error("authentication failed ({code}): {description}")]
    Auth {
        /// OAuth error code, e.g. `invalid_grant`, or a local reason code.
        code: String,
        /// Human-readable description of the failure.
        description: String,
    },

    /// The provider answered 429 again after the single automatic retry,
    /// or the retry was disabled or its `Retry-After` hint exceeded the
    /// wait ceiling.
    #[error("rate limited by the provider, retry after {retry_after:?}")]
    RateLimited {
        /// The provider's `Retry-After` hint, when it sent one.
        retry_after: Option<Duration>,
    },

    /// No response arrived within the configured per-request window.
    #[error("no response within {after:?}")]
    Timeout {
        /// The timeout that elapsed.
        after: Duration,
    },

    /// Any other non-2xx response, carrying the status code and whatever
    /// error payload the provider attached.
    #[error("provider returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// The provider's error message, or the raw body when it was not
        /// the documented error shape.
        message: String,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A transport-level failure below HTTP: connect, DNS, TLS.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A local i/o failure, e.g. binding the redirect listener.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
