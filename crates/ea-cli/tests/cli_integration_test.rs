//! Integration tests for the validate workflow driven through the CLI library.

use elastic_agent_cli::commands::config::{self, Config};
use elastic_agent_cli::commands::validate::{ValidateArgs, evaluate, exit_code_for};
use elastic_agent_cli::formatters::format_validation;
use elastic_agent_core::cli::{ExitCode, OutputFormat};
use elastic_agent_core::keys;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn request_body(entries: &[(&str, &str)]) -> String {
    let settings: serde_json::Map<String, Value> = entries
        .iter()
        .map(|(key, value)| ((*key).to_string(), json!({ "value": value })))
        .collect();
    json!({ "plugin-settings": settings }).to_string()
}

fn write_settings(dir: &TempDir, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.path().join("request.json");
    fs::write(&path, request_body(entries)).unwrap();
    path
}

/// A request the server would send for a cluster using client certificates.
#[test]
fn test_cluster_certs_request_is_accepted() {
    let dir = TempDir::new().unwrap();
    let settings = write_settings(&dir, &[
        (keys::GO_SERVER_URL, "https://ci.example.com:8154/go"),
        (keys::AUTO_REGISTER_TIMEOUT, "10"),
        (keys::MAX_PENDING_PODS, "10"),
        (keys::AUTHENTICATION_STRATEGY, "CLUSTER_CERTS"),
        (keys::CLUSTER_URL, "https://10.0.0.1:6443"),
        (keys::CLUSTER_CA_CERT, "LS0tLS1CRUdJTi..."),
        (keys::CLIENT_KEY_DATA, "LS0tLS1CRUdJTi..."),
        (keys::CLIENT_CERT_DATA, "LS0tLS1CRUdJTi..."),
    ]);
    let args = ValidateArgs {
        settings,
        ..ValidateArgs::default()
    };

    let result = evaluate(&args, &Config::default()).unwrap();
    assert!(result.is_valid(), "unexpected errors: {result:?}");
    assert_eq!(exit_code_for(&result), ExitCode::SUCCESS);
    assert_eq!(format_validation(&result, OutputFormat::Text).unwrap(), "[]");
}

/// Rejected settings come back as the host's error array.
#[test]
fn test_rejected_request_renders_error_array() {
    let dir = TempDir::new().unwrap();
    let settings = write_settings(&dir, &[
        (keys::AUTO_REGISTER_TIMEOUT, "0"),
        (keys::MAX_PENDING_PODS, "10"),
        (keys::AUTHENTICATION_STRATEGY, "OAUTH_TOKEN"),
    ]);
    let args = ValidateArgs {
        settings,
        secure_site_url: Some("https://ci.example.com:8154/go".to_string()),
        ..ValidateArgs::default()
    };

    let result = evaluate(&args, &Config::default()).unwrap();
    assert_eq!(exit_code_for(&result), ExitCode::VALIDATION_FAILED);

    let rendered = format_validation(&result, OutputFormat::Json).unwrap();
    let parsed: Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "key": keys::AUTO_REGISTER_TIMEOUT,
                "message": "Agent auto-register timeout (in minutes) must be a positive integer."
            },
            {
                "key": keys::OAUTH_TOKEN,
                "message": "Oauth token is required when authentication strategy is set to OAUTH_TOKEN."
            }
        ])
    );
}

/// The config file supplies the secure site URL when the command line does not.
#[test]
fn test_config_file_supplies_secure_site_url() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");

    let mut stored = Config::default();
    stored.server.secure_site_url = Some("https://ci.example.com:8154/go".to_string());
    config::save_config(&stored, &config_path).unwrap();

    let settings = write_settings(&dir, &[
        (keys::AUTO_REGISTER_TIMEOUT, "10"),
        (keys::MAX_PENDING_PODS, "10"),
    ]);
    let args = ValidateArgs {
        settings,
        ..ValidateArgs::default()
    };

    let without_config = evaluate(&args, &Config::default()).unwrap();
    assert_eq!(without_config.len(), 1);
    assert_eq!(without_config.errors()[0].key, keys::GO_SERVER_URL);

    let loaded = config::load_config(&config_path).unwrap();
    assert!(evaluate(&args, &loaded).unwrap().is_valid());
}

/// A flat settings object is accepted as well as the request envelope.
#[test]
fn test_flat_settings_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flat.json");
    let flat: serde_json::Map<String, Value> = [
        (keys::GO_SERVER_URL, "https://ci.example.com/go"),
        (keys::AUTO_REGISTER_TIMEOUT, "10"),
        (keys::MAX_PENDING_PODS, "abc"),
        (keys::NAMESPACE, "Bad_Namespace"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), Value::from(value)))
    .collect();
    fs::write(&path, Value::Object(flat).to_string()).unwrap();
    let args = ValidateArgs {
        settings: path,
        ..ValidateArgs::default()
    };

    let result = evaluate(&args, &Config::default()).unwrap();
    let found: Vec<_> = result.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(found, [keys::MAX_PENDING_PODS, keys::NAMESPACE]);
}

/// Unreadable server info is an input error, not a validation failure.
#[test]
fn test_malformed_server_info_is_an_error() {
    let dir = TempDir::new().unwrap();
    let settings = write_settings(&dir, &[]);
    let info = dir.path().join("info.json");
    fs::write(&info, "not json").unwrap();

    let args = ValidateArgs {
        settings,
        server_info: Some(info),
        secure_site_url: None,
    };
    let err = evaluate(&args, &Config::default()).unwrap_err();
    assert!(err.to_string().contains("server info"));
}
