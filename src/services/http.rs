//! Shared blocking HTTP plumbing: client construction and retry with backoff.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};

use crate::domain::AppError;

/// Retry settings for one API.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay_ms: u64) -> Self {
        Self { max_attempts: max_retries.max(1), base_delay: Duration::from_millis(retry_delay_ms) }
    }
}

/// Outcome of a single failed attempt.
#[derive(Debug)]
pub(crate) enum RequestFailure {
    /// Rate limits, server errors, timeouts, connection failures.
    Retryable(AppError),
    Fatal(AppError),
}

pub(crate) fn build_client(service: &str, timeout_secs: u64) -> Result<Client, AppError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("carrier-owl/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::config_error(format!("Failed to create {} HTTP client: {}", service, e)))
}

/// Run `attempt` until it succeeds, fails fatally, or the policy is exhausted.
pub(crate) fn with_retries<T>(
    service: &str,
    policy: &RetryPolicy,
    mut attempt: impl FnMut() -> Result<T, RequestFailure>,
) -> Result<T, AppError> {
    let mut last_error = None;

    for n in 0..policy.max_attempts {
        if n > 0 {
            // Exponential backoff: base * 2^(n-1)
            let delay = policy.base_delay * 2_u32.saturating_pow(n - 1);
            tracing::info!(service, attempt = n + 1, max = policy.max_attempts, "retrying request");
            std::thread::sleep(delay);
        }

        match attempt() {
            Ok(value) => return Ok(value),
            Err(RequestFailure::Retryable(e)) => {
                tracing::warn!(service, error = %e, "request failed");
                last_error = Some(e);
            }
            Err(RequestFailure::Fatal(e)) => return Err(e),
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::http(service, "request failed after all retries")))
}

/// Classify a transport-level error.
pub(crate) fn transport_failure(service: &str, err: reqwest::Error) -> RequestFailure {
    let retryable = err.is_timeout() || err.is_connect();
    let error = AppError::http(service, err.to_string());
    if retryable { RequestFailure::Retryable(error) } else { RequestFailure::Fatal(error) }
}

/// Pass successful responses through; turn error statuses into failures.
pub(crate) fn check_status(service: &str, response: Response) -> Result<Response, RequestFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        Err(RequestFailure::Retryable(AppError::http(service, "rate limited (429)")))
    } else if status.is_server_error() {
        Err(RequestFailure::Retryable(AppError::http(
            service,
            format!("server error ({})", status.as_u16()),
        )))
    } else {
        let body = response.text().unwrap_or_else(|_| "unknown error".to_string());
        Err(RequestFailure::Fatal(AppError::http(
            service,
            format!("API error ({}): {}", status.as_u16(), body.trim()),
        )))
    }
}
