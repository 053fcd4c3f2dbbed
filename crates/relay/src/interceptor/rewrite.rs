//! Gemini API URL rewriting
//!
//! Maps a request aimed at the Gemini API onto a user-supplied proxy base.
//! Gateways disagree with the upstream API about where version and publisher
//! segments live, so after swapping the origin a fixed, ordered list of
//! substring repairs is applied. Each rule sees the output of the one before
//! it. A repair can expose a match for an earlier rule (repeated version
//! segments, or a `//` that hid one), so the chain is rerun until the URL
//! stops changing. The result is therefore a fixed point of the repairs.

use url::{Position, Url};

/// Host whose requests are rerouted
pub const TARGET_HOST: &str = "generativelanguage.googleapis.com";

/// Canonical origin replaced by the proxy base
pub const TARGET_ORIGIN: &str = "https://generativelanguage.googleapis.com";

/// Vertex AI host that expects publisher-scoped model paths
pub const AIPLATFORM_HOST: &str = "aiplatform.googleapis.com";

const PUBLISHER_SEGMENT: &str = "publishers/google";

/// Whether `url` points at the Gemini API host
pub fn is_target_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.eq_ignore_ascii_case(TARGET_HOST)))
        .unwrap_or(false)
}

/// Rewrite a Gemini API URL onto `proxy_base`
///
/// `proxy_base` is expected to be normalized (no trailing slash).
///
/// # Examples
/// ```
/// # use gemini_relay::interceptor::rewrite_url;
/// let rewritten = rewrite_url(
///     "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent",
///     "https://my-proxy.example/v1",
/// );
/// assert_eq!(rewritten, "https://my-proxy.example/v1/models/gemini-pro:generateContent");
/// ```
pub fn rewrite_url(original: &str, proxy_base: &str) -> String {
    let mut url = replace_origin(original, proxy_base);
    // Every rule but publisher injection shortens the URL, and injection
    // fires at most once, so this terminates.
    loop {
        let repaired = repair_path(url.clone());
        if repaired == url {
            return url;
        }
        url = repaired;
    }
}

/// One pass of the ordered repair rules
fn repair_path(url: String) -> String {
    let url = collapse_nested_version(url);
    let url = inject_publisher_path(url);
    let url = collapse_publisher_version(url);
    let url = collapse_duplicate_v1beta(url);
    collapse_slashes(&url)
}

/// Swap the target origin for the proxy base
///
/// Non-canonical spellings of the origin (letter case, explicit port,
/// userinfo) are handled by re-deriving the path from the parsed URL.
fn replace_origin(original: &str, proxy_base: &str) -> String {
    match original.strip_prefix(TARGET_ORIGIN) {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '?', '#']) => {
            format!("{proxy_base}{rest}")
        }
        _ => match Url::parse(original) {
            Ok(url) if url.host_str() == Some(TARGET_HOST) => {
                format!("{proxy_base}{}", &url[Position::BeforePath..])
            }
            _ => original.to_string(),
        },
    }
}

/// A base ending in `/v1` plus a request path starting with its own version
fn collapse_nested_version(url: String) -> String {
    if url.contains("/v1/v1beta/") {
        url.replacen("/v1/v1beta/", "/v1/", 1)
    } else if url.contains("/v1/v1/") {
        url.replacen("/v1/v1/", "/v1/", 1)
    } else {
        url
    }
}

/// Vertex AI serves Google models under `/v1/publishers/google/models/`
fn inject_publisher_path(url: String) -> String {
    if is_aiplatform_url(&url) && !url.contains(PUBLISHER_SEGMENT) && url.contains("/v1/models/") {
        url.replacen("/v1/models/", "/v1/publishers/google/models/", 1)
    } else {
        url
    }
}

fn collapse_publisher_version(url: String) -> String {
    if url.contains("/publishers/google/v1beta/models") {
        url.replacen(
            "/publishers/google/v1beta/models",
            "/publishers/google/models",
            1,
        )
    } else if url.contains("/publishers/google/v1/models") {
        url.replacen("/publishers/google/v1/models", "/publishers/google/models", 1)
    } else {
        url
    }
}

/// A base ending in `/v1beta` plus a request path starting with `/v1beta`
fn collapse_duplicate_v1beta(url: String) -> String {
    if url.contains("/v1beta/v1beta") {
        url.replacen("/v1beta/v1beta", "/v1beta", 1)
    } else {
        url
    }
}

/// Collapse runs of `/` into one, except directly after a `:`
///
/// The exception keeps `scheme://` intact (and any URL embedded in the query).
fn collapse_slashes(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut chars = url.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(c) = chars.next() {
        out.push(c);
        if c == '/' && prev.is_some_and(|p| p != ':') {
            while chars.peek() == Some(&'/') {
                chars.next();
            }
        }
        prev = Some(c);
    }

    out
}

fn is_aiplatform_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.host_str().map(|host| {
                host.eq_ignore_ascii_case(AIPLATFORM_HOST)
                    || host.to_ascii_lowercase().ends_with("-aiplatform.googleapis.com")
            })
        })
        .unwrap_or(false)
}
