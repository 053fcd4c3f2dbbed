//! Request dispatch seam
//!
//! [`Transport`] is the single entry point every outbound request goes
//! through. [`ReqwestTransport`] is the real network implementation; the
//! interceptor wraps any transport without changing its interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use thiserror::Error;

use super::error::ClassifiedError;
use super::request::OutboundRequest;
use crate::config::TransportConfig;
use crate::error::{RelayError, Result};

/// Something that can dispatch an [`OutboundRequest`]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response unmodified
    async fn send(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<Response, ClassifiedError>;

    /// True for transports that already reroute Gemini API traffic
    fn is_interceptor(&self) -> bool {
        false
    }

    /// Name for logging
    fn name(&self) -> &'static str;
}

/// Returned when a request's cancellation token fires before a response arrives
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("request cancelled")]
pub struct RequestCancelled;

/// Network transport backed by [`reqwest::Client`]
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with the configured timeouts
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| RelayError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<Response, ClassifiedError> {
        let (url, method, headers, body, signal) = request.into_parts();

        let mut builder = self.client.request(method, url.as_str()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let pending = builder.send();
        let result = match signal {
            Some(token) => tokio::select! {
                result = pending => result,
                _ = token.cancelled() => return Err(ClassifiedError::transport(RequestCancelled)),
            },
            None => pending.await,
        };

        // reqwest echoes the full URL (query string included) in its errors
        result.map_err(|e| ClassifiedError::transport(e.without_url()))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}
