// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Callback Reporter: delivers one completion report to the issuer.

use edgepub_adapters::{CallbackError, CallbackSink};
use edgepub_core::{CompletionReport, Correlation};

/// Sends completion reports through a [`CallbackSink`].
///
/// Stateless: every call is one PUT, with no retries and no deduplication.
/// The response URL is single-use, so retrying belongs to the issuer.
#[derive(Clone)]
pub struct CallbackReporter<S: CallbackSink> {
    sink: S,
    log_location: String,
}

impl<S: CallbackSink> CallbackReporter<S> {
    /// `log_location` is cited in the reason of reports that carry none.
    pub fn new(sink: S, log_location: impl Into<String>) -> Self {
        Self {
            sink,
            log_location: log_location.into(),
        }
    }

    pub fn log_location(&self) -> &str {
        &self.log_location
    }

    pub async fn send(
        &self,
        report: &CompletionReport,
        correlation: &Correlation,
    ) -> Result<(), CallbackError> {
        let wire = report.to_wire(correlation, &self.log_location);
        let body = wire
            .to_json()
            .map_err(|e| CallbackError::Encode(e.to_string()))?;

        tracing::info!(
            request_id = %correlation.request_id,
            status = %report.status,
            physical_id = %report.physical_id,
            "sending completion report"
        );
        match self.sink.put(&correlation.response_url, body).await {
            Ok(()) => {
                tracing::info!(
                    request_id = %correlation.request_id,
                    "completion report delivered"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    request_id = %correlation.request_id,
                    error = %e,
                    "completion report not delivered"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
