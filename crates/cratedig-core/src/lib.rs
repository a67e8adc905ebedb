//! Shared domain types, input normalization, and configuration for cratedig.

pub mod app_config;
pub mod columns;
pub mod config;
pub mod error;
pub mod inventory;
pub mod normalize;
pub mod release;

pub use app_config::AppConfig;
pub use columns::{load_column_map, ColumnMap, LogicalField, ResolvedColumns};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use inventory::{InventoryRow, NormalizedQuery, NormalizedRow};
pub use normalize::{
    canonical_artist, clean_price, normalize_row, parse_price, sanitize_catalog,
    DEFAULT_PRICE_FLOOR,
};
pub use release::{CandidateRelease, ReleaseFormat, Track};
