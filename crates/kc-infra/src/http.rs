//! Shared HTTP plumbing for the reqwest-based adapters.

use std::time::Duration;

use kc_core::ports::FetchError;
use reqwest::{Client, Response};

/// Builds the client every adapter shares.
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("kindle-clippings/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::failure)
}

/// Maps a transport error, keeping the query string (and with it any API
/// key) out of the message.
pub(crate) fn transport_error(err: reqwest::Error) -> FetchError {
    FetchError::failure(err.without_url())
}

/// Rejects non-success responses.
pub(crate) fn ensure_success(response: Response, endpoint: &str) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            status: status.as_u16(),
            endpoint: endpoint.to_string(),
        })
    }
}
