use thiserror::Error;

/// Failure of any request to an external collaborator.
///
/// Callers convert these into absence (no record, no definition, no
/// metadata); they never abort a whole aggregation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or transport error.
    #[error("fetch failed: {0}")]
    Failure(String),

    #[error("unexpected status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The response parsed but lacks a field we need.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The request was never sent because it could not be signed.
    #[error("signing key invalid: {0}")]
    SigningKeyInvalid(String),
}

impl FetchError {
    pub fn failure(err: impl std::fmt::Display) -> Self {
        Self::Failure(err.to_string())
    }

    pub fn malformed(err: impl std::fmt::Display) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
