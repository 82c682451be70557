// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback channel for completion reports.
//!
//! The response URL is pre-signed by the issuer, so the request must not add
//! headers that were not part of the signature. In particular the body is sent
//! with an empty `Content-Type`.

use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::time::Duration;
use thiserror::Error;

/// Errors from delivering a completion report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallbackError {
    #[error("callback rejected with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("callback transport error: {0}")]
    Transport(String),
    #[error("callback client setup failed: {0}")]
    Client(String),
    #[error("failed to encode report: {0}")]
    Encode(String),
}

/// Adapter for the outbound report channel
#[async_trait]
pub trait CallbackSink: Clone + Send + Sync + 'static {
    /// PUT `body` to `url`. One attempt; no retries.
    async fn put(&self, url: &str, body: String) -> Result<(), CallbackError>;
}

/// HTTP callback sink over reqwest.
#[derive(Clone, Debug)]
pub struct HttpCallbackSink {
    client: reqwest::Client,
}

impl HttpCallbackSink {
    pub fn new(timeout: Duration) -> Result<Self, CallbackError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CallbackError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CallbackSink for HttpCallbackSink {
    async fn put(&self, url: &str, body: String) -> Result<(), CallbackError> {
        let length = body.len();
        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "")
            .header(CONTENT_LENGTH, length)
            .body(body)
            .send()
            .await
            .map_err(|e| CallbackError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CallbackError::Status {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(status = status.as_u16(), bytes = length, "callback delivered");
        Ok(())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{CallbackError, CallbackSink};
    use async_trait::async_trait;
    use edgepub_core::WireReport;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Recorded callback request
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CallbackCall {
        pub url: String,
        pub body: String,
    }

    #[derive(Default)]
    struct FakeCallbackState {
        calls: Vec<CallbackCall>,
        error: Option<CallbackError>,
    }

    /// Fake callback sink for testing
    #[derive(Clone, Default)]
    pub struct FakeCallbackSink {
        inner: Arc<Mutex<FakeCallbackState>>,
    }

    impl FakeCallbackSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Record calls but fail every delivery with `error`.
        pub fn fail_with(&self, error: CallbackError) {
            self.inner.lock().error = Some(error);
        }

        pub fn calls(&self) -> Vec<CallbackCall> {
            self.inner.lock().calls.clone()
        }

        /// Bodies of all calls, decoded. Undecodable bodies are skipped.
        pub fn reports(&self) -> Vec<WireReport> {
            self.inner
                .lock()
                .calls
                .iter()
                .filter_map(|call| serde_json::from_str(&call.body).ok())
                .collect()
        }

        /// Number of reports answering `request_id`.
        pub fn count_for(&self, request_id: &str) -> usize {
            self.reports()
                .iter()
                .filter(|r| r.request_id == request_id)
                .count()
        }
    }

    #[async_trait]
    impl CallbackSink for FakeCallbackSink {
        async fn put(&self, url: &str, body: String) -> Result<(), CallbackError> {
            let mut inner = self.inner.lock();
            inner.calls.push(CallbackCall {
                url: url.to_string(),
                body,
            });
            match &inner.error {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{CallbackCall, FakeCallbackSink};

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
