//! Tests for logging functionality
//!
//! Initialization can only succeed once per process; later calls are
//! expected to fail gracefully rather than panic.

use dotuml::core::logging::{init_logging, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_invalid_format_rejected_before_init() {
    assert!(init_logging(Some("info"), Some("xml")).is_err());
}

#[test]
fn test_init_logging_repeated() {
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("dotuml=trace"), Some("json"));
    let _ = init_logging(Some("off"), Some("pretty"));
    let _ = init_logging(None, None);
}

#[test]
fn test_pipeline_runs_with_logging_enabled() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let text = dotuml::render(r#"{ "units": [] }"#).unwrap();
    assert_eq!(text, "classDiagram\n");
}
