use bedwood_storefront::config::{AppConfig, LogFormat};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;

const ARGS: [&str; 1] = ["bedwood-storefront"];

// Load with `config.yaml` looked up in `dir` instead of the working directory.
fn load_in(dir: &Path) -> Result<AppConfig, config::ConfigError> {
    AppConfig::load_from_args_in(ARGS, dir)
}

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("BEDWOOD_SERVER__PORT");
        env::remove_var("BEDWOOD_MESSAGING__POPUP_RECIPIENT");
        env::remove_var("BEDWOOD_MESSAGING__CART_RECIPIENT");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("TIMEOUT_DISABLED");
        env::remove_var("LOG_FORMAT");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = load_in(dir.path()).expect("Failed to load config");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.messaging.base_url, "https://wa.me/");
    assert_eq!(config.messaging.popup_recipient, "+919675111719");
    assert_eq!(config.messaging.cart_recipient, "8630715936");
    assert_eq!(config.popup.image_path, "/static/popup.png");
    assert_eq!(config.logging.format, LogFormat::Text);
    assert!(!config.cards.is_empty());
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("BEDWOOD_SERVER__PORT", "9090");
        env::set_var("BEDWOOD_MESSAGING__POPUP_RECIPIENT", "+15551234567");
    }

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = load_in(dir.path()).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    // The leading '+' survives: env values are not parsed as numbers.
    assert_eq!(config.messaging.popup_recipient, "+15551234567");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env_vars();
    unsafe {
        env::set_var("BEDWOOD_SERVER__PORT", "9090");
    }

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = AppConfig::load_from_args_in(
        [
            "bedwood-storefront",
            "--port",
            "7000",
            "--log-format",
            "json",
            "--timeout-disabled",
            "true",
        ],
        dir.path(),
    )
    .expect("Failed to load config");
    assert_eq!(config.server.port, 7000);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.resilience.timeout_disabled);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("storefront.yaml");
    fs::write(
        &file_path,
        r#"
server:
  port: 7070
messaging:
  cart_recipient: "919000000001"
cards:
  - image: /static/cards/lamps.jpg
    title: Lamps
    paragraph: Brass and rattan
    link: /collections/lamps
"#,
    )
    .expect("Failed to write temp config");

    let config = AppConfig::load_from_args_in(
        [
            "bedwood-storefront",
            "--config",
            file_path.to_str().expect("utf-8 path"),
        ],
        dir.path(),
    )
    .expect("Failed to load config from file");

    assert_eq!(config.server.port, 7070);
    assert_eq!(config.messaging.cart_recipient, "919000000001");
    assert_eq!(config.cards.len(), 1);
    assert_eq!(config.cards[0].title, "Lamps");
    // Untouched keys keep their defaults.
    assert_eq!(config.messaging.popup_recipient, "+919675111719");
}

#[test]
#[serial]
fn test_config_yaml_fallback() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("config.yaml"), "server:\n  port: 6060\n")
        .expect("Failed to write config.yaml");

    let config = load_in(dir.path()).expect("Failed to load config");
    assert_eq!(config.server.port, 6060);
}

#[test]
#[serial]
fn test_explicit_config_wins_over_fallback() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("config.yaml"), "server:\n  port: 6060\n")
        .expect("Failed to write config.yaml");
    let explicit = dir.path().join("other.yaml");
    fs::write(&explicit, "server:\n  port: 6161\n").expect("Failed to write other.yaml");

    let config = AppConfig::load_from_args_in(
        [
            "bedwood-storefront",
            "--config",
            explicit.to_str().expect("utf-8 path"),
        ],
        dir.path(),
    )
    .expect("Failed to load config");
    assert_eq!(config.server.port, 6161);
}

#[test]
#[serial]
fn test_invalid_recipient_is_rejected() {
    clear_env_vars();
    unsafe {
        env::set_var("BEDWOOD_MESSAGING__CART_RECIPIENT", "call-me-maybe");
    }

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = load_in(dir.path()).expect_err("recipient must be validated");
    assert!(err.to_string().contains("messaging.cart_recipient"));

    clear_env_vars();
}
