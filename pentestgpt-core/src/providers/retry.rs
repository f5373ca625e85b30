//! Retry logic for LLM provider operations
//!
//! Completion calls are retried with exponential backoff when the failure looks
//! transient (HTTP 5xx, rate limits, connection timeouts). Permanent failures
//! such as auth errors surface immediately.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use tracing::warn;

use crate::Result;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: usize,
    /// Initial delay before first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Whether to add jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            jitter: true,
        }
    }
}

/// Classify an error message as transient (retriable) or permanent
pub fn is_transient(error_message: &str) -> bool {
    let lower = error_message.to_lowercase();

    let transient_patterns = [
        // HTTP 5xx server errors
        "500",
        "502",
        "503",
        "504",
        "internal server error",
        "bad gateway",
        "service unavailable",
        "gateway timeout",
        // Rate limiting
        "429",
        "rate limit",
        "too many requests",
        // Connection issues
        "timeout",
        "timed out",
        "connection refused",
        "connection reset",
        "network error",
        // Provider overload messages
        "overloaded",
        "temporarily unavailable",
        "try again",
    ];

    transient_patterns
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// Build an exponential backoff strategy from configuration
pub fn build_backoff(config: &RetryConfig) -> ExponentialBuilder {
    let mut builder = ExponentialBuilder::default()
        .with_min_delay(config.initial_delay)
        .with_max_delay(config.max_delay)
        .with_max_times(config.max_retries);

    if config.jitter {
        builder = builder.with_jitter();
    }

    builder
}

/// Run an async operation, retrying transient failures per the config
pub async fn with_retries<T, F, Fut>(config: &RetryConfig, operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    operation
        .retry(build_backoff(config))
        .when(|e| is_transient(&e.to_string()))
        .notify(|err, dur| {
            warn!("Transient provider error, retrying in {:?}: {}", dur, err);
        })
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::Error;

    fn fast_config() -> RetryConfig {
        RetryConfig {
            max_retries: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            jitter: false,
        }
    }

    #[test]
    fn test_transient_http_500() {
        assert!(is_transient("HTTP 500 Internal Server Error"));
        assert!(is_transient("Status code 500"));
        assert!(is_transient("internal server error"));
    }

    #[test]
    fn test_transient_rate_limit() {
        assert!(is_transient("429 Too Many Requests"));
        assert!(is_transient("rate limit exceeded"));
    }

    #[test]
    fn test_transient_connection() {
        assert!(is_transient("connection timeout"));
        assert!(is_transient("connection refused"));
        assert!(is_transient("network error occurred"));
    }

    #[test]
    fn test_permanent_auth() {
        assert!(!is_transient("401 Unauthorized"));
        assert!(!is_transient("Invalid API key"));
        assert!(!is_transient("403 Forbidden"));
    }

    #[test]
    fn test_permanent_bad_request() {
        assert!(!is_transient("400 Bad Request"));
        assert!(!is_transient("Malformed request"));
    }

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.initial_delay, Duration::from_secs(1));
        assert_eq!(config.max_delay, Duration::from_secs(30));
        assert!(config.jitter);
    }

    #[tokio::test]
    async fn test_with_retries_recovers_from_transient_errors() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);

        let result = with_retries(&fast_config(), || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(Error::Provider("503 service unavailable".to_string()))
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert_eq!(result.expect("should succeed after retries"), "done");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retries_gives_up_on_permanent_errors() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);

        let result: Result<()> = with_retries(&fast_config(), || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(Error::Provider("401 Unauthorized".to_string()))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
