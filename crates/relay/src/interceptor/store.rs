//! Process-wide interceptor configuration
//!
//! The store holds a single immutable [`InterceptorConfig`] snapshot behind an
//! [`ArcSwap`]. Writers replace the whole snapshot; each request loads it once,
//! so the enabled flag and the proxy base are always read together.

use std::sync::Arc;

use arc_swap::ArcSwap;
use url::Url;

use super::LOG_TARGET;
use crate::config::ProxySettings;
use crate::sanitize::sanitize_url;

/// Effective interceptor settings
///
/// If `enabled` is true, `proxy_base` is an absolute http(s) URL without a
/// trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InterceptorConfig {
    enabled: bool,
    proxy_base: Option<String>,
}

impl InterceptorConfig {
    /// The disabled configuration every store starts with
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn proxy_base(&self) -> Option<&str> {
        self.proxy_base.as_deref()
    }

    /// Proxy base to rewrite against, or `None` when requests pass through
    pub fn active_proxy(&self) -> Option<&str> {
        if self.enabled {
            self.proxy_base.as_deref()
        } else {
            None
        }
    }

    /// Build a snapshot without validation
    #[cfg(test)]
    pub(crate) fn unchecked(proxy_base: &str) -> Self {
        Self {
            enabled: true,
            proxy_base: Some(proxy_base.to_string()),
        }
    }
}

/// Shared holder for the current [`InterceptorConfig`]
#[derive(Debug)]
pub struct InterceptorStore {
    current: ArcSwap<InterceptorConfig>,
}

impl Default for InterceptorStore {
    fn default() -> Self {
        Self {
            current: ArcSwap::from_pointee(InterceptorConfig::disabled()),
        }
    }
}

impl InterceptorStore {
    /// Create a store with proxying disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded from file settings
    pub fn from_settings(settings: &ProxySettings) -> Self {
        let store = Self::new();
        store.configure(settings.enabled, settings.url.as_deref());
        store
    }

    #[cfg(test)]
    pub(crate) fn with_config(config: InterceptorConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Current configuration snapshot
    pub fn snapshot(&self) -> Arc<InterceptorConfig> {
        self.current.load_full()
    }

    /// Validate and commit new proxy settings
    ///
    /// The proxy URL is trimmed and one trailing slash is removed. When
    /// proxying is requested but the URL does not parse or does not use an
    /// http-family scheme, the feature is disabled instead. Returns the
    /// snapshot that was committed.
    pub fn configure(&self, enabled: bool, proxy_url: Option<&str>) -> Arc<InterceptorConfig> {
        let normalized = proxy_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| u.strip_suffix('/').unwrap_or(u));

        let next = match (enabled, normalized) {
            (true, Some(candidate)) => validate_proxy_base(candidate),
            _ => InterceptorConfig::disabled(),
        };

        let next = Arc::new(next);
        self.current.store(Arc::clone(&next));

        match next.active_proxy() {
            Some(base) => tracing::info!(
                target: LOG_TARGET,
                proxy = %sanitize_url(base),
                "Gemini API proxy enabled"
            ),
            None => tracing::debug!(target: LOG_TARGET, "Gemini API proxy disabled"),
        }

        next
    }
}

fn validate_proxy_base(candidate: &str) -> InterceptorConfig {
    match Url::parse(candidate) {
        Ok(url) if url.scheme().starts_with("http") => InterceptorConfig {
            enabled: true,
            proxy_base: Some(candidate.to_string()),
        },
        Ok(url) => {
            tracing::warn!(
                target: LOG_TARGET,
                scheme = url.scheme(),
                "Proxy URL must use http or https, disabling proxy"
            );
            InterceptorConfig::disabled()
        }
        Err(e) => {
            tracing::error!(
                target: LOG_TARGET,
                proxy = %sanitize_url(candidate),
                error = %e,
                "Invalid proxy URL, disabling proxy"
            );
            InterceptorConfig::disabled()
        }
    }
}
