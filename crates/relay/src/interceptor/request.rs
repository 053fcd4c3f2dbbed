//! Outbound request descriptors
//!
//! Callers hand the interceptor one of three shapes: a bare URL string, a
//! parsed [`Url`], or a fully built [`OutboundRequest`]. All of them are
//! normalized into an [`OutboundRequest`] before any rewrite logic runs.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{HOST, HeaderMap};
use tokio_util::sync::CancellationToken;
use url::Url;

/// The request shapes accepted by [`super::fetch`]
#[derive(Debug, Clone)]
pub enum RequestInput {
    /// A URL string, possibly unparseable
    Raw(String),
    /// An already parsed URL
    Url(Url),
    /// A full request carrying its own method, headers, body and signal
    Request(OutboundRequest),
}

impl From<&str> for RequestInput {
    fn from(url: &str) -> Self {
        RequestInput::Raw(url.to_string())
    }
}

impl From<String> for RequestInput {
    fn from(url: String) -> Self {
        RequestInput::Raw(url)
    }
}

impl From<Url> for RequestInput {
    fn from(url: Url) -> Self {
        RequestInput::Url(url)
    }
}

impl From<OutboundRequest> for RequestInput {
    fn from(request: OutboundRequest) -> Self {
        RequestInput::Request(request)
    }
}

impl RequestInput {
    /// Normalize into a request descriptor
    ///
    /// Options that are set take precedence over the fields of a full
    /// request, mirroring how per-call options override a prepared request.
    pub fn into_request(self, options: RequestOptions) -> OutboundRequest {
        let base = match self {
            RequestInput::Raw(url) => OutboundRequest::new(url),
            RequestInput::Url(url) => OutboundRequest::new(url.to_string()),
            RequestInput::Request(request) => request,
        };
        options.apply(base)
    }
}

/// Per-call request options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Option<HeaderMap>,
    pub body: Option<Bytes>,
    pub signal: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    fn apply(self, mut request: OutboundRequest) -> OutboundRequest {
        if let Some(method) = self.method {
            request.method = method;
        }
        if let Some(headers) = self.headers {
            request.headers = headers;
        }
        if self.body.is_some() {
            request.body = self.body;
        }
        if self.signal.is_some() {
            request.signal = self.signal;
        }
        request
    }
}

/// An immutable description of one outbound HTTP request
///
/// The URL is kept as a string so that unparseable input can still be passed
/// through untouched; the transport reports it as a failure.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    url: String,
    method: Method,
    headers: HeaderMap,
    body: Option<Bytes>,
    signal: Option<CancellationToken>,
}

impl OutboundRequest {
    /// A `GET` request with no headers or body
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            signal: None,
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn signal(&self) -> Option<&CancellationToken> {
        self.signal.as_ref()
    }

    /// Derive a copy of this request aimed at `url`
    ///
    /// Method, body and cancellation signal carry over unchanged. An explicit
    /// `Host` header would name the old origin, so it is dropped.
    pub fn retarget(&self, url: impl Into<String>) -> Self {
        let mut headers = self.headers.clone();
        headers.remove(HOST);

        Self {
            url: url.into(),
            method: self.method.clone(),
            headers,
            body: self.body.clone(),
            signal: self.signal.clone(),
        }
    }

    /// Split into owned parts for dispatch
    pub fn into_parts(
        self,
    ) -> (
        String,
        Method,
        HeaderMap,
        Option<Bytes>,
        Option<CancellationToken>,
    ) {
        (self.url, self.method, self.headers, self.body, self.signal)
    }
}
