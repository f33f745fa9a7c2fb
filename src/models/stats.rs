use serde::{Deserialize, Serialize};

/// A monetary amount as Discogs reports it in marketplace stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceValue {
    pub value: f64,
    pub currency: String,
}

/// Marketplace statistics for a release. `lowest_price` is null when no
/// copy is currently listed for sale; that is a normal outcome, not an
/// error.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketStats {
    pub lowest_price: Option<PriceValue>,
    #[serde(default)]
    pub num_for_sale: Option<u32>,
    #[serde(default)]
    pub blocked_from_sale: bool,
}

/// Marketplace stats paired with the rate-limit metadata of the response
/// that carried them. `requests_remaining` is None when the header was
/// missing or unreadable.
#[derive(Debug, Clone)]
pub struct StatsEnvelope {
    pub stats: MarketStats,
    pub requests_remaining: Option<u64>,
}

/// Estimated value of the whole collection. Discogs returns these as
/// pre-formatted strings (e.g. "€1,234.56").
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionValue {
    pub minimum: String,
    pub median: String,
    pub maximum: String,
}
