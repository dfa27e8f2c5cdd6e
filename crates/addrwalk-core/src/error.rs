#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("remote API error: {0}")]
    Remote(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures raised while talking to the remote API, before any
/// application-level error could be read from the response body.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
