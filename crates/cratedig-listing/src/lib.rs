//! Attribute derivation and destination rows for matched records.

pub mod derive;
pub mod handle;
pub mod metafield;
pub mod pricing;
pub mod row;
pub mod signage;
pub mod text;
pub mod weight;

pub use derive::{derive_attributes, DerivedAttributes, Listing, ListingBuilder, ListingOptions};
pub use handle::{base_handle, slugify, HandleRegistry};
pub use metafield::{condition_summary, inventory_date, shop_artist};
pub use pricing::{decide_price, round_to_quarter, suggested_price, PriceDecision, PricingStrategy};
pub use row::{OutputRow, OUTPUT_COLUMNS};
pub use signage::{release_signage, signage_bucket};
pub use weight::{disc_count, grams_to_pounds, weight_grams};
