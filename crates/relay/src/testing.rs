//! Test utilities for gemini-relay - scripted transports
//!
//! [`RecordingTransport`] stands in for the network in tests that need to see
//! exactly which requests reached the transport, or that need a failure with a
//! specific message.

use std::sync::Mutex;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Response;
use thiserror::Error;

use crate::interceptor::{ClassifiedError, OutboundRequest, Transport};

/// The failure a [`RecordingTransport`] returns when scripted to fail
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct ScriptedFailure(pub String);

#[derive(Debug, Clone)]
enum Outcome {
    Respond { status: StatusCode, body: String },
    Fail(String),
}

/// A transport that records every request and answers from a script
#[derive(Debug)]
pub struct RecordingTransport {
    outcome: Outcome,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl RecordingTransport {
    /// Answer every request with `200 OK` and an empty body
    pub fn ok() -> Self {
        Self::with_status(StatusCode::OK, "")
    }

    /// Answer every request with `status` and `body`
    pub fn with_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Respond {
                status,
                body: body.into(),
            },
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every request with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// URLs of the requests received so far, in order
    pub fn urls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|request| request.url().to_string())
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: OutboundRequest) -> Result<Response, ClassifiedError> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        match &self.outcome {
            Outcome::Respond { status, body } => {
                let mut response = http::Response::new(body.clone());
                *response.status_mut() = *status;
                Ok(Response::from(response))
            }
            Outcome::Fail(message) => Err(ClassifiedError::transport(ScriptedFailure(
                message.clone(),
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
