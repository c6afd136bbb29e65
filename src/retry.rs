//! Bounded retry execution with failure classification and linear backoff.
//!
//! A [`RetryPolicy`] caps the total number of attempts and sets the backoff
//! multiplier; [`execute`] runs a caller-supplied async operation under that
//! policy, stopping early on success or on a non-retryable failure.

use log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default maximum number of attempts for backend requests.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff multiplier between attempts in milliseconds.
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;

/// Broad classification of a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request itself is invalid (remote 4xx). Retrying identically cannot help.
    Client,
    /// The remote or the transport misbehaved (5xx, connection failure). Worth retrying.
    Server,
    /// Anything the executor could not classify. Terminal by default.
    Unknown,
}

/// The outcome of a single failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
    /// HTTP status code, when the failure came from a remote response.
    pub status: Option<u16>,
}

impl Failure {
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Client,
            message: message.into(),
            status: None,
        }
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Server,
            message: message.into(),
            status: None,
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Unknown,
            message: message.into(),
            status: None,
        }
    }

    /// Builds a failure from an HTTP status code, picking the kind by range.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let kind = if (400..500).contains(&status) {
            FailureKind::Client
        } else if status >= 500 {
            FailureKind::Server
        } else {
            FailureKind::Unknown
        };
        Self {
            kind,
            message: message.into(),
            status: Some(status),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for Failure {}

impl From<reqwest::Error> for Failure {
    fn from(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Failure::from_status(status.as_u16(), error.to_string()),
            // No status means the request never completed: connection refused,
            // timeout, dns failure. Those are transport faults and retryable.
            None => Failure::server(error.to_string()),
        }
    }
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<Failure>() {
            Ok(failure) => failure,
            Err(error) => Failure::unknown(format!("{:#}", error)),
        }
    }
}

/// Default classification: 4xx is terminal, 5xx is retryable, and a failure
/// without a status code is retryable only when it is a transport fault.
pub fn default_classifier(failure: &Failure) -> bool {
    match failure.status {
        Some(status) if (400..500).contains(&status) => false,
        Some(_) => true,
        None => failure.kind == FailureKind::Server,
    }
}

/// Immutable per-invocation retry configuration.
///
/// `max_attempts` bounds total attempts including the first. The delay before
/// attempt N+1 is `base_delay * N` (linear backoff, no ceiling).
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    classifier: Arc<dyn Fn(&Failure) -> bool + Send + Sync>,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .finish_non_exhaustive()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
            classifier: Arc::new(default_classifier),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default classifier.
    /// Fails fast on `max_attempts == 0`; that is a configuration fault, not
    /// an operational failure, so it is surfaced before any attempt runs.
    pub fn new(max_attempts: u32, base_delay: Duration) -> anyhow::Result<Self> {
        anyhow::ensure!(
            max_attempts >= 1,
            "Retry policy requires at least one attempt"
        );
        Ok(Self {
            max_attempts,
            base_delay,
            classifier: Arc::new(default_classifier),
        })
    }

    /// Replaces the retryability classifier.
    pub fn with_classifier<F>(mut self, classifier: F) -> Self
    where
        F: Fn(&Failure) -> bool + Send + Sync + 'static,
    {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn is_retryable(&self, failure: &Failure) -> bool {
        (self.classifier)(failure)
    }

    /// Delay to wait after a failed attempt `n` (1-based) before the next one.
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Terminal failure of a retry sequence: the last attempt's failure plus the
/// number of attempts that were made.
#[derive(Debug)]
pub struct RetryError {
    pub failure: Failure,
    pub attempts: u32,
}

impl fmt::Display for RetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts > 1 {
            write!(f, "{} (after {} attempts)", self.failure, self.attempts)
        } else {
            write!(f, "{}", self.failure)
        }
    }
}

impl std::error::Error for RetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.failure)
    }
}

/// Executes an async operation under a retry policy.
///
/// Attempts run strictly sequentially. A success returns immediately. A
/// failure is terminal when attempts are exhausted or when the policy
/// classifies it as non-retryable; otherwise the executor sleeps
/// `base_delay * attempt` and re-invokes the operation. The terminal failure
/// is always returned to the caller, never swallowed.
pub async fn execute<F, Fut, T>(
    operation_name: &str,
    policy: &RetryPolicy,
    operation: F,
) -> Result<T, RetryError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T, Failure>>,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(failure) => {
                if attempt == policy.max_attempts() {
                    warn!(
                        "{}: attempt {}/{} failed ({}), giving up",
                        operation_name,
                        attempt,
                        policy.max_attempts(),
                        failure
                    );
                    return Err(RetryError {
                        failure,
                        attempts: attempt,
                    });
                }

                if !policy.is_retryable(&failure) {
                    debug!("{}: non-retryable failure: {}", operation_name, failure);
                    return Err(RetryError {
                        failure,
                        attempts: attempt,
                    });
                }

                let delay = policy.backoff(attempt);
                warn!(
                    "{}: attempt {}/{} failed ({}), retrying in {}ms...",
                    operation_name,
                    attempt,
                    policy.max_attempts(),
                    failure,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
