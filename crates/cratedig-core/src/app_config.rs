use std::path::PathBuf;

use rust_decimal::Decimal;

#[derive(Clone)]
pub struct AppConfig {
    pub discogs_token: String,
    pub log_level: String,
    pub discogs_base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub inter_call_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub candidates_per_query: u32,
    pub min_match_score: u32,
    pub price_floor: Decimal,
    pub store_name: String,
    pub columns_path: Option<PathBuf>,
    pub ocr_command: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("discogs_token", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("discogs_base_url", &self.discogs_base_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("inter_call_delay_ms", &self.inter_call_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("candidates_per_query", &self.candidates_per_query)
            .field("min_match_score", &self.min_match_score)
            .field("price_floor", &self.price_floor)
            .field("store_name", &self.store_name)
            .field("columns_path", &self.columns_path)
            .field("ocr_command", &self.ocr_command)
            .finish()
    }
}
