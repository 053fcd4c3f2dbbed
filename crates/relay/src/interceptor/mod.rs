//! Outbound request interception for the Gemini API
//!
//! Requests to the Gemini API host are rewritten onto a user-configured proxy
//! base; everything else passes through untouched. See [`install`] for the
//! entry point and [`InterceptorStore`] for the configuration it reads.

mod error;
#[cfg(test)]
mod log_capture;
mod request;
mod rewrite;
mod shim;
mod store;
mod transport;

pub use error::{
    BoxError, ClassifiedError, ErrorKind, FETCH_ERROR_NAME, NETWORK_ERROR_NAME,
    TROUBLESHOOTING_CHECKLIST,
};
pub use request::{OutboundRequest, RequestInput, RequestOptions};
pub use rewrite::{AIPLATFORM_HOST, TARGET_HOST, TARGET_ORIGIN, is_target_url, rewrite_url};
pub use shim::{InterceptingTransport, fetch, global_transport, install, install_global};
pub use store::{InterceptorConfig, InterceptorStore};
pub use transport::{ReqwestTransport, RequestCancelled, Transport};

/// Tracing target for every interceptor diagnostic
pub const LOG_TARGET: &str = "gemini_relay::interceptor";
