use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let discogs_token = require("DISCOGS_TOKEN")?;

    let log_level = or_default("CRATEDIG_LOG_LEVEL", "info");
    let discogs_base_url = or_default("CRATEDIG_DISCOGS_BASE_URL", "https://api.discogs.com");
    let user_agent = or_default("CRATEDIG_USER_AGENT", "cratedig/0.1 (+record-catalog-sync)");

    let request_timeout_secs = parse_var::<u64>(
        &or_default("CRATEDIG_REQUEST_TIMEOUT_SECS", "40"),
        "CRATEDIG_REQUEST_TIMEOUT_SECS",
    )?;
    let inter_call_delay_ms = parse_var::<u64>(
        &or_default("CRATEDIG_INTER_CALL_DELAY_MS", "500"),
        "CRATEDIG_INTER_CALL_DELAY_MS",
    )?;
    let max_retries =
        parse_var::<u32>(&or_default("CRATEDIG_MAX_RETRIES", "4"), "CRATEDIG_MAX_RETRIES")?;
    let retry_backoff_base_ms = parse_var::<u64>(
        &or_default("CRATEDIG_RETRY_BACKOFF_BASE_MS", "1000"),
        "CRATEDIG_RETRY_BACKOFF_BASE_MS",
    )?;
    let candidates_per_query = parse_var::<u32>(
        &or_default("CRATEDIG_CANDIDATES_PER_QUERY", "5"),
        "CRATEDIG_CANDIDATES_PER_QUERY",
    )?;
    if !(1..=100).contains(&candidates_per_query) {
        return Err(ConfigError::InvalidEnvVar {
            var: "CRATEDIG_CANDIDATES_PER_QUERY".to_string(),
            reason: format!("{candidates_per_query} is outside 1..=100"),
        });
    }
    let min_match_score = parse_var::<u32>(
        &or_default("CRATEDIG_MIN_MATCH_SCORE", "40"),
        "CRATEDIG_MIN_MATCH_SCORE",
    )?;

    let price_floor =
        parse_var::<Decimal>(&or_default("CRATEDIG_PRICE_FLOOR", "2.50"), "CRATEDIG_PRICE_FLOOR")?;
    if price_floor.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar {
            var: "CRATEDIG_PRICE_FLOOR".to_string(),
            reason: "price floor must not be negative".to_string(),
        });
    }

    let store_name = or_default("CRATEDIG_STORE_NAME", "Unusual Finds");
    let columns_path = optional("CRATEDIG_COLUMNS_PATH").map(PathBuf::from);
    let ocr_command = optional("CRATEDIG_OCR_COMMAND");

    Ok(AppConfig {
        discogs_token,
        log_level,
        discogs_base_url,
        user_agent,
        request_timeout_secs,
        inter_call_delay_ms,
        max_retries,
        retry_backoff_base_ms,
        candidates_per_query,
        min_match_score,
        price_floor,
        store_name,
        columns_path,
        ocr_command,
    })
}

fn parse_var<T>(raw: &str, var: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
