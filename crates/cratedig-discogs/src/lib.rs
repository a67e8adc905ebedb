pub mod client;
pub mod error;
pub mod gate;
pub(crate) mod retry;
pub mod types;

pub use client::{ClientSettings, DiscogsClient, SearchParams};
pub use error::DiscogsError;
pub use gate::RateGate;
pub use types::SearchResult;
