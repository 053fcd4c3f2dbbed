//! Integration tests for Gemini API URL rewriting
//!
//! Covers the documented gateway layouts, the order-sensitive repair rules,
//! and stability of the rewrite on its own output.

use gemini_relay::interceptor::{TARGET_ORIGIN, is_target_url, rewrite_url};

// =============================================================================
// Gateway layouts
// =============================================================================

#[test]
fn test_versioned_base_absorbs_request_version() {
    let rewritten = rewrite_url(
        "https://generativelanguage.googleapis.com/v1beta/models/foo:generateContent",
        "https://my-proxy.example/v1",
    );
    assert_eq!(rewritten, "https://my-proxy.example/v1/models/foo:generateContent");
}

#[test]
fn test_aiplatform_base_gets_publisher_path() {
    let rewritten = rewrite_url(
        "https://generativelanguage.googleapis.com/v1/models/foo",
        "https://aiplatform.googleapis.com/v1",
    );
    assert_eq!(
        rewritten,
        "https://aiplatform.googleapis.com/v1/publishers/google/models/foo"
    );
}

#[test]
fn test_regional_aiplatform_base_gets_publisher_path() {
    let rewritten = rewrite_url(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:streamGenerateContent?alt=sse",
        "https://us-central1-aiplatform.googleapis.com/v1",
    );
    assert_eq!(
        rewritten,
        "https://us-central1-aiplatform.googleapis.com/v1/publishers/google/models/gemini-pro:streamGenerateContent?alt=sse"
    );
}

#[test]
fn test_v1beta_base_keeps_single_version_segment() {
    let rewritten = rewrite_url(
        "https://generativelanguage.googleapis.com/v1beta/models/foo:countTokens",
        "https://gateway.example/google/v1beta",
    );
    assert_eq!(rewritten, "https://gateway.example/google/v1beta/models/foo:countTokens");
    assert!(!rewritten.contains("/v1beta/v1beta"));
}

#[test]
fn test_plain_base_keeps_request_path() {
    let rewritten = rewrite_url(
        "https://generativelanguage.googleapis.com/v1beta/models/foo:generateContent",
        "http://localhost:8080",
    );
    assert_eq!(rewritten, "http://localhost:8080/v1beta/models/foo:generateContent");
}

#[test]
fn test_publisher_scoped_base_drops_inner_version() {
    let rewritten = rewrite_url(
        "https://generativelanguage.googleapis.com/v1beta/models/foo:generateContent",
        "https://gateway.example/v1/projects/p/locations/l/publishers/google",
    );
    assert_eq!(
        rewritten,
        "https://gateway.example/v1/projects/p/locations/l/publishers/google/models/foo:generateContent"
    );
}

// =============================================================================
// Query, fragment and slashes
// =============================================================================

#[test]
fn test_query_string_is_carried_verbatim() {
    let rewritten = rewrite_url(
        "https://generativelanguage.googleapis.com/v1beta/models/foo:generateContent?key=abc&alt=sse",
        "https://my-proxy.example/v1",
    );
    assert_eq!(
        rewritten,
        "https://my-proxy.example/v1/models/foo:generateContent?key=abc&alt=sse"
    );
}

#[test]
fn test_repeated_slashes_are_collapsed_but_scheme_survives() {
    let rewritten = rewrite_url(
        "https://generativelanguage.googleapis.com//v1beta//models/foo",
        "https://proxy.example",
    );
    assert_eq!(rewritten, "https://proxy.example/v1beta/models/foo");
}

#[test]
fn test_origin_without_path() {
    assert_eq!(rewrite_url(TARGET_ORIGIN, "https://proxy.example/v1"), "https://proxy.example/v1");
}

// =============================================================================
// Stability
// =============================================================================

#[test]
fn test_rewrite_is_stable_on_its_own_output() {
    let bases = [
        "https://proxy.example",
        "https://proxy.example/v1",
        "https://proxy.example/v1beta",
        "http://localhost:8080/gemini",
        "https://aiplatform.googleapis.com/v1",
        "https://europe-west4-aiplatform.googleapis.com/v1",
    ];
    let paths = [
        "/v1beta/models/gemini-pro:generateContent",
        "/v1/models/foo:streamGenerateContent?alt=sse",
        "/v1beta/models",
        "/upload/v1beta/files?key=abc",
        "/v1beta/tunedModels/x:generateContent",
        "/v1beta/models/foo:embedContent#frag",
    ];

    for base in bases {
        for path in paths {
            let original = format!("{TARGET_ORIGIN}{path}");
            let once = rewrite_url(&original, base);
            let twice = rewrite_url(&once, base);
            assert_eq!(once, twice, "rewrite not stable for base {base} and path {path}");
            assert!(once.starts_with(base), "{once} does not start with {base}");
            assert!(!once.contains("/v1beta/v1beta"), "{once}");
        }
    }
}

#[test]
fn test_rewrite_is_stable_with_repeated_versions() {
    let cases = [
        ("https://p.example/v1", "/v1/v1beta/models/x"),
        ("http://localhost:8080/v1/v1", "/v1beta/models/foo"),
        ("https://p.example/v1/", "/v1beta/models/x:generateContent"),
        ("https://p.example/v1beta", "/v1beta/v1beta/v1beta/models/x"),
        ("https://p.example/v1/publishers/google", "/v1/v1beta/models/x"),
        ("https://aiplatform.googleapis.com/v1/v1", "/v1beta/models/gemini-pro"),
    ];

    for (base, path) in cases {
        let once = rewrite_url(&format!("{TARGET_ORIGIN}{path}"), base);
        let twice = rewrite_url(&once, base);
        assert_eq!(once, twice, "rewrite not stable for base {base} and path {path}");
        assert!(!once.contains("/v1/v1/"), "{once}");
        assert!(!once.contains("/v1/v1beta/"), "{once}");
        assert!(!once.contains("/v1beta/v1beta"), "{once}");
    }
}

// =============================================================================
// Host matching
// =============================================================================

#[test]
fn test_target_detection() {
    assert!(is_target_url("https://generativelanguage.googleapis.com/v1beta/models"));
    assert!(is_target_url("https://GenerativeLanguage.GoogleAPIs.com/v1"));
    assert!(is_target_url("http://generativelanguage.googleapis.com:443/v1"));
    assert!(!is_target_url("https://aiplatform.googleapis.com/v1/models"));
    assert!(!is_target_url("https://generativelanguage.googleapis.com.evil.example/v1"));
    assert!(!is_target_url("https://example.com/?u=https://generativelanguage.googleapis.com"));
    assert!(!is_target_url("not a url"));
}
