//! The interception layer
//!
//! [`InterceptingTransport`] decorates a real [`Transport`]. Each call loads
//! one configuration snapshot and then either passes the request through or
//! rewrites it onto the configured proxy:
//!
//! - Pass-through: proxying disabled, or the host is not the Gemini API.
//! - Rewrite-and-dispatch: the request is retargeted and sent; a failure is
//!   reshaped into a [`ClassifiedError`] of kind [`ErrorKind::Network`].
//! - Rewrite failure: the rewritten URL is unusable, so the original request
//!   is sent unchanged.
//!
//! [`ErrorKind::Network`]: super::ErrorKind::Network

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use reqwest::Response;
use url::Url;

use super::LOG_TARGET;
use super::error::ClassifiedError;
use super::request::{OutboundRequest, RequestInput, RequestOptions};
use super::rewrite::{is_target_url, rewrite_url};
use super::store::InterceptorStore;
use super::transport::Transport;
use crate::error::{RelayError, Result};
use crate::sanitize::sanitize_url;

static GLOBAL_TRANSPORT: OnceLock<Arc<dyn Transport>> = OnceLock::new();

/// A [`Transport`] that reroutes Gemini API requests through the configured proxy
pub struct InterceptingTransport {
    inner: Arc<dyn Transport>,
    store: Arc<InterceptorStore>,
}

impl InterceptingTransport {
    fn new(inner: Arc<dyn Transport>, store: Arc<InterceptorStore>) -> Self {
        Self { inner, store }
    }

    /// Build the retargeted request for `proxy_base`
    fn rewrite_request(&self, request: &OutboundRequest, proxy_base: &str) -> Result<OutboundRequest> {
        let rewritten = rewrite_url(request.url(), proxy_base);
        let url = Url::parse(&rewritten).map_err(|e| {
            RelayError::Rewrite(format!(
                "Rewritten URL {} is invalid: {e}",
                sanitize_url(&rewritten)
            ))
        })?;
        Ok(request.retarget(url))
    }
}

#[async_trait]
impl Transport for InterceptingTransport {
    async fn send(&self, request: OutboundRequest) -> std::result::Result<Response, ClassifiedError> {
        let config = self.store.snapshot();

        let proxy_base = match config.active_proxy() {
            Some(base) if is_target_url(request.url()) => base,
            _ => return self.inner.send(request).await,
        };

        let rewritten = match self.rewrite_request(&request, proxy_base) {
            Ok(rewritten) => rewritten,
            Err(e) => {
                tracing::warn!(
                    target: LOG_TARGET,
                    url = %sanitize_url(request.url()),
                    error = %e,
                    "Failed to rewrite request, sending it to the original URL"
                );
                return self.inner.send(request).await;
            }
        };

        tracing::debug!(
            target: LOG_TARGET,
            method = %request.method(),
            from = %sanitize_url(request.url()),
            to = %sanitize_url(rewritten.url()),
            "Rerouting Gemini API request through proxy"
        );

        let target_url = rewritten.url().to_string();
        match self.inner.send(rewritten).await {
            Ok(response) => Ok(response),
            Err(failure) => {
                let error = ClassifiedError::network(
                    failure,
                    proxy_base,
                    &target_url,
                    &[request.url(), &target_url],
                );
                tracing::error!(
                    target: LOG_TARGET,
                    proxy = %sanitize_url(proxy_base),
                    target_url = %sanitize_url(&target_url),
                    error = %error.message().lines().next().unwrap_or_default(),
                    "Proxied request failed"
                );
                Err(error)
            }
        }
    }

    fn is_interceptor(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "gemini-interceptor"
    }
}

/// Wrap `transport` with the interceptor
///
/// Installing over a transport that already intercepts returns it unchanged,
/// so at most one interception layer is ever active.
pub fn install(transport: Arc<dyn Transport>, store: Arc<InterceptorStore>) -> Arc<dyn Transport> {
    if transport.is_interceptor() {
        tracing::debug!(
            target: LOG_TARGET,
            transport = transport.name(),
            "Interceptor already installed, skipping"
        );
        return transport;
    }

    tracing::info!(
        target: LOG_TARGET,
        transport = transport.name(),
        "Gemini API interceptor installed"
    );
    Arc::new(InterceptingTransport::new(transport, store))
}

/// Install the interceptor as the process-wide transport
///
/// The first call wins; later calls return the transport installed by the
/// first one and ignore their arguments.
pub fn install_global(transport: Arc<dyn Transport>, store: Arc<InterceptorStore>) -> Arc<dyn Transport> {
    if let Some(existing) = GLOBAL_TRANSPORT.get() {
        tracing::debug!(target: LOG_TARGET, "Global interceptor already installed, skipping");
        return Arc::clone(existing);
    }

    Arc::clone(GLOBAL_TRANSPORT.get_or_init(|| install(transport, store)))
}

/// The process-wide transport, if [`install_global`] has run
pub fn global_transport() -> Option<Arc<dyn Transport>> {
    GLOBAL_TRANSPORT.get().cloned()
}

/// Normalize `input` and `options` into a request and send it through `transport`
pub async fn fetch(
    transport: &dyn Transport,
    input: impl Into<RequestInput>,
    options: RequestOptions,
) -> std::result::Result<Response, ClassifiedError> {
    let request = input.into().into_request(options);
    transport.send(request).await
}
