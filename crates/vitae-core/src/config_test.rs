use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "VITAE_ENV"));
}

#[test]
fn build_app_config_uses_defaults_on_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.log_level, "info");
    assert_eq!(
        config.targets_path,
        std::path::PathBuf::from("./config/profiles.yaml")
    );
    assert_eq!(
        config.output_path,
        std::path::PathBuf::from("./output/profiles.jsonl")
    );
    assert!(config.session_cookies.is_none());
    assert_eq!(config.base_url, "https://www.linkedin.com");
    assert_eq!(config.scraper_request_timeout_secs, 30);
    assert_eq!(config.scraper_user_agent, DEFAULT_USER_AGENT);
    assert_eq!(config.scraper_inter_request_delay_ms, 1000);
    assert_eq!(config.scraper_max_retries, 2);
    assert_eq!(config.scraper_retry_backoff_base_secs, 5);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VITAE_ENV", "production");
    map.insert("VITAE_LOG_LEVEL", "debug");
    map.insert("VITAE_TARGETS_PATH", "/etc/vitae/targets.yaml");
    map.insert("VITAE_BASE_URL", "http://127.0.0.1:9000/");
    map.insert("VITAE_SCRAPER_MAX_RETRIES", "0");
    map.insert("LINKEDIN_COOKIES", "li_at=abc; JSESSIONID=\"ajax:1\"");

    let config = build_app_config(lookup_from_map(&map)).unwrap();

    assert_eq!(config.env, Environment::Production);
    assert_eq!(config.log_level, "debug");
    assert_eq!(
        config.targets_path,
        std::path::PathBuf::from("/etc/vitae/targets.yaml")
    );
    assert_eq!(config.base_url, "http://127.0.0.1:9000");
    assert_eq!(config.scraper_max_retries, 0);
    assert_eq!(
        config.session_cookies.as_deref(),
        Some("li_at=abc; JSESSIONID=\"ajax:1\"")
    );
}

#[test]
fn build_app_config_treats_blank_cookies_as_absent() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("LINKEDIN_COOKIES", "   ");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(config.session_cookies.is_none());
}

#[test]
fn build_app_config_fails_on_invalid_timeout() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VITAE_SCRAPER_REQUEST_TIMEOUT_SECS", "thirty");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITAE_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(VITAE_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_on_negative_retries() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VITAE_SCRAPER_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITAE_SCRAPER_MAX_RETRIES"),
        "expected InvalidEnvVar(VITAE_SCRAPER_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("VITAE_BASE_URL", "linkedin.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITAE_BASE_URL"),
        "expected InvalidEnvVar(VITAE_BASE_URL), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_cookies() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("LINKEDIN_COOKIES", "li_at=super-secret");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}
