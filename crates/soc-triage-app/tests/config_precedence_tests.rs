//! Integration tests for startup configuration precedence.

use std::collections::HashMap;

use soc_triage_app::config::{
    API_URL_ENV, ConfigError, ConfigOverrides, DEFAULT_API_URL, REQUEST_TIMEOUT_ENV,
    REVEAL_DELAY_ENV, parse_file_config, resolve_config,
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn config_precedence_tests_flag_beats_env_beats_file() {
    let file = parse_file_config(
        "api_url = \"https://file.example.test\"\nreveal_delay_ms = 900\nrequest_timeout_ms = 5000\n",
    )
    .expect("file config should parse");
    let env = env_from(&[
        (API_URL_ENV, "https://env.example.test"),
        (REVEAL_DELAY_ENV, "300"),
    ]);

    let from_env = resolve_config(&ConfigOverrides::default(), Some(&file), &env)
        .expect("config should resolve");
    assert_eq!(from_env.api_url, "https://env.example.test");
    assert_eq!(from_env.reveal_delay_ms, 300);
    assert_eq!(from_env.request_timeout_ms, 5_000);

    let overrides = ConfigOverrides {
        api_url: Some("https://flag.example.test".to_string()),
        reveal_delay_ms: Some(0),
        request_timeout_ms: None,
    };
    let from_flags = resolve_config(&overrides, Some(&file), &env).expect("config should resolve");
    assert_eq!(from_flags.api_url, "https://flag.example.test");
    assert_eq!(from_flags.reveal_delay_ms, 0);
    assert_eq!(from_flags.request_timeout_ms, 5_000);
}

#[test]
fn config_precedence_tests_blank_env_counts_as_unset() {
    let env = env_from(&[(API_URL_ENV, "   "), (REVEAL_DELAY_ENV, "")]);
    let config = resolve_config(&ConfigOverrides::default(), None, env)
        .expect("config should resolve");
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.reveal_delay_ms, 600);
}

#[test]
fn config_precedence_tests_rejects_non_numeric_env() {
    let env = env_from(&[(REQUEST_TIMEOUT_ENV, "soon")]);
    let error = resolve_config(&ConfigOverrides::default(), None, env)
        .expect_err("non-numeric timeout should fail");
    assert!(matches!(
        error,
        ConfigError::InvalidNumber {
            name: REQUEST_TIMEOUT_ENV,
            ..
        }
    ));
}

#[test]
fn config_precedence_tests_rejects_blank_override() {
    let overrides = ConfigOverrides {
        api_url: Some(" ".to_string()),
        ..ConfigOverrides::default()
    };
    let error = resolve_config(&overrides, None, env_from(&[]))
        .expect_err("blank url should fail");
    assert!(matches!(error, ConfigError::EmptyApiUrl));
}

#[test]
fn config_precedence_tests_example_file_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../config/soc-triage.example.toml");
    let file = soc_triage_app::config::load_file_config(&path).expect("example config should load");
    let config = resolve_config(&ConfigOverrides::default(), Some(&file), env_from(&[]))
        .expect("config should resolve");
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.reveal_delay_ms, 600);
    assert_eq!(config.request_timeout_ms, 30_000);
}
