//! Retry utilities for transient Flickr failures.
//!
//! Provides classification of retryable errors and exponential backoff.

use crate::error::FlickrError;
use std::time::Duration;

/// Determine whether a Flickr error is worth retrying.
///
/// Retryable errors: timeouts, rate limits (429), server errors (5xx),
/// requests that never connected (refused, DNS). Never retryable: API
/// envelope errors (bad key, unknown photo) and undecodable bodies.
pub fn is_retryable(error: &FlickrError) -> bool {
    match error {
        FlickrError::Timeout { .. } => true,
        FlickrError::Http {
            status_code: Some(code),
            ..
        } => *code == 429 || (500..=599).contains(code),
        FlickrError::Http { connect, .. } => *connect,
        FlickrError::Api { .. } | FlickrError::Decode { .. } => false,
    }
}

/// Calculate exponential backoff duration for a given attempt.
///
/// Uses `base_delay * 2^attempt` with a cap at 30 seconds.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(30_000))
}
