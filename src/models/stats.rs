// file: src/models/stats.rs
// description: aggregate statistics over shopping listings

use serde::{Deserialize, Serialize};

/// Per-group listing count and price figures.
///
/// `brand` holds the group label; listings without a brand share the `""`
/// label. Price fields are `None` when no listing in the group had a usable
/// price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandStats {
    pub brand: String,
    pub item_count: usize,
    pub mean_price: Option<f64>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandShare {
    pub brand: String,
    pub item_count: usize,
    /// Percentage of the listings covered by the returned brands, 0..=100
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation, `None` for a single price
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Half-open `[lower, upper)` bucket; the last bucket also includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}
