//! Classified transport failures
//!
//! [`ClassifiedError`] is the only error a caller of the interceptor ever
//! sees. Failures on the proxied path are reshaped into the
//! [`ErrorKind::Network`] class with a sanitized, actionable message; the
//! underlying failure is kept as the error source.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::sanitize::{redact_urls, sanitize_url};

/// Boxed error used as the cause of a [`ClassifiedError`]
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Stable name carried by proxied-path transport failures
pub const NETWORK_ERROR_NAME: &str = "NetworkError";

/// Stable name carried by every other transport failure
pub const FETCH_ERROR_NAME: &str = "FetchError";

/// Checklist appended to every network-class message
pub const TROUBLESHOOTING_CHECKLIST: &str = "\
Please check:
  1. The proxy server is running and reachable from this machine
  2. The proxy URL in your settings is correct (scheme, host, port and path)
  3. Your network connection, firewall and VPN allow the connection
  4. The proxy accepts requests for the Gemini API paths it receives";

/// Failure category callers can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The rewritten request to the configured proxy failed
    Network,
    /// A pass-through or fallback request failed
    Other,
}

impl ErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Network => NETWORK_ERROR_NAME,
            ErrorKind::Other => FETCH_ERROR_NAME,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A transport failure with a stable category name
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: BoxError,
}

impl ClassifiedError {
    /// Wrap a raw transport failure
    ///
    /// The message is the full source chain of `cause` joined with `": "`.
    pub fn transport(cause: impl Into<BoxError>) -> Self {
        let cause = cause.into();
        Self {
            kind: ErrorKind::Other,
            message: error_chain(cause.as_ref()),
            cause,
        }
    }

    /// Reshape a failure of the proxied request into a network-class error
    ///
    /// `raw_urls` lists URLs that may appear verbatim in the transport
    /// message (the original and rewritten request URLs); they are redacted
    /// before the message is built.
    pub(crate) fn network(
        failure: ClassifiedError,
        proxy_base: &str,
        target_url: &str,
        raw_urls: &[&str],
    ) -> Self {
        let mut redact: Vec<&str> = raw_urls.to_vec();
        redact.push(proxy_base);
        // Longest first so a URL is never partially replaced by its own prefix
        redact.sort_by_key(|u| std::cmp::Reverse(u.len()));

        let detail = redact_urls(&failure.message, &redact);
        let message = format!(
            "Failed to reach the Gemini API through the configured proxy: {detail}\n\n\
             Proxy URL: {proxy}\n\
             Target URL: {target}\n\n\
             {TROUBLESHOOTING_CHECKLIST}",
            proxy = sanitize_url(proxy_base),
            target = sanitize_url(target_url),
        );

        Self {
            kind: ErrorKind::Network,
            message,
            cause: Box::new(failure),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Stable category name (`"NetworkError"` or `"FetchError"`)
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_network(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        // Some errors repeat their source in their own Display
        if !parts.last().is_some_and(|last| last.contains(&text)) {
            parts.push(text);
        }
        source = inner.source();
    }
    parts.join(": ")
}
