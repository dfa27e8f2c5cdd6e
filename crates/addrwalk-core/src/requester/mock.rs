use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{CoreError, TransportError};

use super::HttpRequester;

/// A GET issued against the mock, captured for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

enum Reply {
    Json(serde_json::Value),
    TransportFailure(String),
}

/// A scripted HTTP requester for testing. Replies are handed out in the
/// order they were added via the builder; every request is recorded.
pub struct MockRequester {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockRequester {
    pub fn builder() -> MockRequesterBuilder {
        MockRequesterBuilder {
            replies: VecDeque::new(),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub struct MockRequesterBuilder {
    replies: VecDeque<Reply>,
}

impl MockRequesterBuilder {
    pub fn then_json(mut self, body: serde_json::Value) -> Self {
        self.replies.push_back(Reply::Json(body));
        self
    }

    pub fn then_transport_failure(mut self, message: &str) -> Self {
        self.replies
            .push_back(Reply::TransportFailure(message.to_owned()));
        self
    }

    pub fn build(self) -> MockRequester {
        MockRequester {
            replies: Mutex::new(self.replies),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpRequester for MockRequester {
    async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<serde_json::Value, CoreError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_owned(),
            params: params.to_vec(),
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Json(body)) => Ok(body),
            Some(Reply::TransportFailure(message)) => Err(TransportError::Status {
                status: 503,
                body: message,
            }
            .into()),
            None => Err(TransportError::InvalidResponse(format!(
                "mock has no scripted reply for {url}"
            ))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_in_order_and_records_requests() {
        let mock = MockRequester::builder()
            .then_json(serde_json::json!({ "n": 1 }))
            .then_transport_failure("down")
            .build();
        let params = vec![("token".to_owned(), "abc".to_owned())];

        let first = mock.get_json("http://x/a", &params).await.unwrap();
        assert_eq!(first["n"], 1);
        let second = mock.get_json("http://x/b", &[]).await;
        assert!(matches!(
            second,
            Err(CoreError::Transport(TransportError::Status { status: 503, .. }))
        ));
        assert!(mock.get_json("http://x/c", &[]).await.is_err());

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].param("token"), Some("abc"));
        assert_eq!(requests[1].url, "http://x/b");
    }
}
