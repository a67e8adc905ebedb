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

/// Returns a map with all required env vars populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("DISCOGS_TOKEN", "test-token");
    m
}

#[test]
fn build_app_config_fails_without_token() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "DISCOGS_TOKEN"),
        "expected MissingEnvVar(DISCOGS_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_token_as_missing() {
    let mut map = HashMap::new();
    map.insert("DISCOGS_TOKEN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should parse");
    assert_eq!(cfg.discogs_token, "test-token");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.discogs_base_url, "https://api.discogs.com");
    assert_eq!(cfg.request_timeout_secs, 40);
    assert_eq!(cfg.inter_call_delay_ms, 500);
    assert_eq!(cfg.max_retries, 4);
    assert_eq!(cfg.retry_backoff_base_ms, 1000);
    assert_eq!(cfg.candidates_per_query, 5);
    assert_eq!(cfg.min_match_score, 40);
    assert_eq!(cfg.price_floor, Decimal::new(250, 2));
    assert_eq!(cfg.store_name, "Unusual Finds");
    assert!(cfg.columns_path.is_none());
    assert!(cfg.ocr_command.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("CRATEDIG_INTER_CALL_DELAY_MS", "1200");
    map.insert("CRATEDIG_MAX_RETRIES", "2");
    map.insert("CRATEDIG_PRICE_FLOOR", "5.00");
    map.insert("CRATEDIG_COLUMNS_PATH", "./config/columns.yaml");
    map.insert("CRATEDIG_OCR_COMMAND", "tesseract");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inter_call_delay_ms, 1200);
    assert_eq!(cfg.max_retries, 2);
    assert_eq!(cfg.price_floor, Decimal::new(500, 2));
    assert_eq!(
        cfg.columns_path.as_deref(),
        Some(std::path::Path::new("./config/columns.yaml"))
    );
    assert_eq!(cfg.ocr_command.as_deref(), Some("tesseract"));
}

#[test]
fn build_app_config_rejects_invalid_delay() {
    let mut map = full_env();
    map.insert("CRATEDIG_INTER_CALL_DELAY_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CRATEDIG_INTER_CALL_DELAY_MS"
        ),
        "expected InvalidEnvVar(CRATEDIG_INTER_CALL_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_candidates() {
    let mut map = full_env();
    map.insert("CRATEDIG_CANDIDATES_PER_QUERY", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CRATEDIG_CANDIDATES_PER_QUERY"
    ));
}

#[test]
fn build_app_config_rejects_negative_price_floor() {
    let mut map = full_env();
    map.insert("CRATEDIG_PRICE_FLOOR", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CRATEDIG_PRICE_FLOOR"
        )
    );
}

#[test]
fn debug_output_redacts_token() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-token"));
    assert!(rendered.contains("[redacted]"));
}
