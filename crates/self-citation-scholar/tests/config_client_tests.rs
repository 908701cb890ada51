//! Configuration and client tests.
//!
//! Tests actual behavior, not constants.

use std::time::Duration;

use self_citation_scholar::client::SemanticScholarClient;
use self_citation_scholar::config::{Config, PipelineConfig, RetryPolicy};

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_default_has_no_api_key() {
    let config = Config::default();
    assert!(!config.has_api_key());
}

#[test]
fn test_config_with_api_key() {
    let config = Config::new(Some("test-key".to_string()));
    assert!(config.has_api_key());
    assert_eq!(config.api_key.as_deref(), Some("test-key"));
}

#[test]
fn test_config_debug_hides_api_key() {
    let config = Config::new(Some("super-secret-key".to_string()));
    let debug = format!("{config:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(debug.contains("has_api_key: true"));
}

#[test]
fn test_testing_config_points_at_mock_server() {
    let config = Config::for_testing("http://127.0.0.1:9999");
    assert_eq!(config.graph_api_url, "http://127.0.0.1:9999/graph/v1");
    assert_eq!(config.retry.initial_delay, Duration::ZERO);
}

#[test]
fn test_retry_policy_doubles() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.delay_for(0), Duration::from_millis(500));
    assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
    assert_eq!(policy.delay_for(4), Duration::from_millis(8000));
}

#[test]
fn test_pipeline_batch_size_never_zero() {
    let config = PipelineConfig::default().with_batch_size(0);
    assert_eq!(config.batch_size, 1);

    let config = PipelineConfig::for_testing().with_batch_size(4);
    assert_eq!(config.batch_size, 4);
    assert_eq!(config.batch_pause, Duration::ZERO);
}

// =============================================================================
// Client Behavior Tests
// =============================================================================

#[test]
fn test_client_creation_succeeds() {
    let client = SemanticScholarClient::new(Config::default());
    assert!(client.is_ok());
}

#[test]
fn test_client_reports_api_key_status() {
    let client = SemanticScholarClient::new(Config::new(Some("key".to_string()))).unwrap();
    assert!(client.has_api_key());

    let client_no_key = SemanticScholarClient::new(Config::default()).unwrap();
    assert!(!client_no_key.has_api_key());
}

#[test]
fn test_client_debug_hides_api_key() {
    let client = SemanticScholarClient::new(Config::new(Some("super-secret-key".to_string())))
        .unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(debug.contains("has_api_key"));
}

#[test]
fn test_client_rejects_invalid_header_key() {
    let client = SemanticScholarClient::new(Config::new(Some("bad\nkey".to_string())));
    assert!(client.is_err());
}
