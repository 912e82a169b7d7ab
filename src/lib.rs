// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod analysis;
pub mod client;
pub mod config;
pub mod error;
pub mod exporter;
pub mod models;
pub mod pipeline;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis::{
    GroupKey, KeywordExtractor, aggregate_by_group, aggregate_records, brand_share,
    describe_prices, extract_top_keywords, price_histogram, summarize_trend,
};
pub use client::NaverClient;
pub use config::{AnalysisConfig, ApiConfig, Config, ExportConfig, Target};
pub use error::{InsightError, Result};
pub use exporter::{CsvExporter, DatasetKind, ExportManifest, JsonExporter};
pub use models::{
    BlogPost, BrandShare, BrandStats, Document, KeywordCount, PriceBucket, PriceSummary,
    PricedItem, ShopItem, TrendPoint, TrendSummary,
};
pub use pipeline::{CollectionStats, Collector, InsightInputs, InsightReport, ProgressTracker};
pub use utils::{OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let _extractor = KeywordExtractor::with_script_class(&config.analysis.script_class)
            .expect("default script class compiles");
        assert_eq!(GroupKey::default(), GroupKey::Brand);
    }
}
