//! Process-wide install
//!
//! Kept in its own test binary because the global transport can only be set
//! once per process.

use std::sync::Arc;

use gemini_relay::interceptor::{
    InterceptorStore, RequestOptions, fetch, global_transport, install_global,
};
use gemini_relay::testing::RecordingTransport;

#[tokio::test]
async fn test_install_global_first_call_wins() {
    assert!(global_transport().is_none());

    let store = Arc::new(InterceptorStore::new());
    store.configure(true, Some("https://my-proxy.example/v1"));

    let first_inner = Arc::new(RecordingTransport::ok());
    let second_inner = Arc::new(RecordingTransport::ok());

    let first = install_global(first_inner.clone(), store.clone());
    let second = install_global(second_inner.clone(), store);

    assert!(Arc::ptr_eq(&first, &second));
    assert!(first.is_interceptor());

    let global = global_transport().unwrap();
    assert!(Arc::ptr_eq(&first, &global));

    fetch(
        global.as_ref(),
        "https://generativelanguage.googleapis.com/v1beta/models/foo:countTokens",
        RequestOptions::new(),
    )
    .await
    .unwrap();

    assert_eq!(first_inner.urls(), vec!["https://my-proxy.example/v1/models/foo:countTokens".to_string()]);
    assert!(second_inner.urls().is_empty());
}
