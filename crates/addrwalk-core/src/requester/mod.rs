//! HTTP requester abstraction layer.
//!
//! Defines the [`HttpRequester`] trait consumed by the client and the
//! pagination loop, a `reqwest` implementation ([`ReqwestRequester`]) and a
//! scripted test double (`mock::MockRequester`).

mod connection;
mod http_adapter;
#[cfg(test)]
pub mod mock;
pub(crate) mod protocol;

pub use connection::parse_base_url;
pub use http_adapter::ReqwestRequester;

use async_trait::async_trait;

use crate::error::CoreError;

/// Ordered query parameters attached to a GET request.
pub type QueryParams = Vec<(String, String)>;

/// Issues a GET request and returns the decoded JSON body.
///
/// Implementations own timeout enforcement and transport-level logging.
/// They must not retry: a failure is surfaced to the caller as-is.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value, CoreError>;
}
