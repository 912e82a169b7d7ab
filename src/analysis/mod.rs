// file: src/analysis/mod.rs
// description: analysis module exports
// reference: internal module structure

pub mod aggregate;
pub mod keywords;
pub mod patterns;
pub mod prices;
pub mod trend;

pub use aggregate::{GroupKey, aggregate_by_group, aggregate_records, brand_share};
pub use keywords::{KeywordExtractor, extract_top_keywords};
pub use prices::{describe_prices, price_histogram};
pub use trend::summarize_trend;
