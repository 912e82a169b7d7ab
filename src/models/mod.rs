// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod item;
pub mod keyword;
pub mod stats;
pub mod trend;

pub use document::{BlogPost, Document};
pub use item::{PricedItem, ShopItem, coerce_price};
pub use keyword::KeywordCount;
pub use stats::{BrandShare, BrandStats, PriceBucket, PriceSummary};
pub use trend::{TrendPoint, TrendSummary};
