use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header;
use tracing::{debug, trace};

use crate::error::{CoreError, TransportError};

use super::protocol::remote_error;
use super::HttpRequester;

/// Connect timeout applied regardless of the configured request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// [`HttpRequester`] backed by a pooled `reqwest` client.
///
/// The request timeout is fixed at construction. If `requests_per_second`
/// is set, every outbound GET waits for the limiter first; nothing is ever
/// retried.
pub struct ReqwestRequester {
    client: reqwest::Client,
    limiter: Option<DirectRateLimiter>,
    next_id: AtomicU64,
}

impl ReqwestRequester {
    pub fn new(timeout: Duration, requests_per_second: Option<u32>) -> Result<Self, CoreError> {
        if timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "request timeout must be greater than zero".to_owned(),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .tcp_nodelay(true)
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("build HTTP client: {e}")))?;

        let limiter = match requests_per_second {
            None => None,
            Some(limit) => {
                let limit = NonZeroU32::new(limit).ok_or_else(|| {
                    CoreError::InvalidConfig("requests_per_second must be at least 1".to_owned())
                })?;
                Some(RateLimiter::direct(Quota::per_second(limit)))
            }
        };

        Ok(Self {
            client,
            limiter,
            next_id: AtomicU64::new(1),
        })
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

#[async_trait]
impl HttpRequester for ReqwestRequester {
    async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value, CoreError> {
        self.wait_for_rate_limit().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        // Parameter names only; values include the API token.
        let param_names: Vec<&str> = params.iter().map(|(name, _)| name.as_str()).collect();
        debug!(http.id = id, http.url = url, http.params = ?param_names, "GET");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(params)
            .send()
            .await
            .map_err(redact_url)?;
        let status = response.status();

        let body = response.text().await.map_err(redact_url)?;
        debug!(http.id = id, %status, body_len = body.len(), "GET response");
        trace!(http.id = id, body = %body, "GET response body");

        let decoded = serde_json::from_str::<serde_json::Value>(&body);
        if !status.is_success() {
            // The remote API reports most failures as `{"error": "..."}`
            // alongside a 4xx/5xx status.
            if let Some(message) = decoded.as_ref().ok().and_then(remote_error) {
                return Err(CoreError::Remote(message.to_owned()));
            }
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        decoded.map_err(|e| {
            TransportError::InvalidResponse(format!("decode JSON response: {e}; body={body}"))
                .into()
        })
    }
}

/// reqwest errors carry the request URL, whose query string holds the token.
fn redact_url(err: reqwest::Error) -> TransportError {
    TransportError::Http(err.without_url())
}
