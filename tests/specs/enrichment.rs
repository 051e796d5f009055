//! Request-context enrichment and serialization formats.

use crate::prelude::*;
use reqlog::{Config, Metadata};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn served_json_record_carries_the_request_context_block() {
    let dir = tempdir().unwrap();
    let config = Config {
        json: true,
        app_guid: "req-42".to_string(),
        app_name: "shop".to_string(),
        ..Config::default()
    };
    let mut logger = served_logger(dir.path(), config);
    logger.info("hello");
    assert!(logger.save());

    let content = read(&dir.path().join("202608/05.log"));
    let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(record["app_guid"], json!("req-42"));
    assert_eq!(record["app_name"], json!("shop"));
    assert_eq!(record["ip"], json!("10.0.0.7"));
    assert_eq!(record["host"], json!("example.com"));
    assert_eq!(record["method"], json!("GET"));
    assert_eq!(record["uri"], json!("/orders?id=9"));
    assert_eq!(record["user_agent"], json!("curl/8.0"));
    assert_eq!(record["header"]["accept"], json!("*/*"));
    assert_eq!(record["log_type"], json!(["info"]));
}

#[test]
fn custom_metadata_is_attached_but_loses_to_request_context() {
    let dir = tempdir().unwrap();
    let config = Config {
        json: true,
        ..Config::default()
    };
    let mut logger = served_logger(dir.path(), config);

    let mut custom = Metadata::new();
    custom.insert("uid".to_string(), json!(7));
    custom.insert("ip".to_string(), json!("1.2.3.4"));
    logger.record_with("hello", "info", custom, &Default::default());
    assert!(logger.save());

    let content = read(&dir.path().join("202608/05.log"));
    let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(record["uid"], json!(7));
    assert_eq!(record["ip"], json!("10.0.0.7"), "request context wins");
}

#[test]
fn served_text_uses_a_delimiter_line_and_flattened_fields() {
    let dir = tempdir().unwrap();
    let mut logger = served_logger(dir.path(), Config::default());
    logger.info("hello");
    assert!(logger.save());

    let content = read(&dir.path().join("202608/05.log"));
    assert!(content.contains(
        "---------------------------------  [2026-08-05T09:30:00+0000] 10.0.0.7 GET example.com /orders?id=9  ------------------------------"
    ));
    assert!(content.contains("info:[ info ] hello"));
    assert!(content.contains("user-agent:curl/8.0"));
    // The discrete fields live only in the delimiter line
    assert!(!content.contains("ip:10.0.0.7"));
    assert!(!content.contains("uri:/orders"));
}

#[test]
fn empty_fields_are_omitted_from_text_output_but_kept_in_json() {
    let dir = tempdir().unwrap();

    let mut logger = served_logger(dir.path(), Config::default());
    logger.info("hello");
    assert!(logger.save());
    let text = read(&dir.path().join("202608/05.log"));
    assert!(
        !text.contains("app_name"),
        "unset app_name must vanish from text output"
    );

    let json_dir = tempdir().unwrap();
    let config = Config {
        json: true,
        ..Config::default()
    };
    let mut logger = served_logger(json_dir.path(), config);
    logger.info("hello");
    assert!(logger.save());
    let content = read(&json_dir.path().join("202608/05.log"));
    let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(record["app_name"], json!(""), "JSON keeps empty values");
}

#[test]
fn batch_records_carry_no_request_context() {
    let dir = tempdir().unwrap();
    let config = Config {
        json: true,
        ..Config::default()
    };
    let mut logger = batch_logger(dir.path(), config);
    logger.info("job done");

    let content = read(&dir.path().join("202608/05_cli.log"));
    let record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert!(record.get("ip").is_none());
    assert!(record.get("header").is_none());
    assert_eq!(record["info"], json!("job done"));
    assert!(record["timestamp"].as_str().unwrap().starts_with("2026-08-05"));
}

#[test]
fn structured_entries_flush_as_compact_json_text() {
    let dir = tempdir().unwrap();
    let mut logger = served_logger(dir.path(), Config::default());
    logger.sql(json!({"query": "select 1", "rows": 0}));
    assert!(logger.save());

    let content = read(&dir.path().join("202608/05.log"));
    assert!(content.contains(r#"[ sql ] {"query":"select 1","rows":0}"#));
}
