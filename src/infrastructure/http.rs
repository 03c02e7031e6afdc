//! Shared HTTP plumbing for the capability clients

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::warn;

use crate::domain::error::CapabilityError;
use crate::domain::recording::Duration;

/// Build the HTTP client shared by one adapter
pub(crate) fn build_client() -> Client {
    Client::builder().build().unwrap_or_else(|e| {
        warn!(error = %e, "HTTP client setup failed, using defaults");
        Client::new()
    })
}

/// Start a POST, bounded by `timeout` when one is set
pub(crate) fn post(client: &Client, url: &str, timeout: Option<Duration>) -> RequestBuilder {
    let request = client.post(url);
    match timeout {
        Some(t) => request.timeout(t.as_std()),
        None => request,
    }
}

/// Map a transport failure to a capability error
pub(crate) fn transport_error(err: reqwest::Error) -> CapabilityError {
    if err.is_timeout() {
        CapabilityError::Timeout
    } else {
        CapabilityError::Request(err.to_string())
    }
}

/// Pass successful responses through, turn error statuses into capability errors
pub(crate) async fn check_status(response: Response) -> Result<Response, CapabilityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(CapabilityError::InvalidApiKey),
        StatusCode::TOO_MANY_REQUESTS => Err(CapabilityError::RateLimited),
        _ => {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CapabilityError::Service {
                status: status.as_u16(),
                message,
            })
        }
    }
}
