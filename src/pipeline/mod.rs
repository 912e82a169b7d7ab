// file: src/pipeline/mod.rs
// description: pipeline module exports and public api
// reference: collection runs and report assembly

pub mod collector;
pub mod progress;
pub mod report;

pub use collector::Collector;
pub use progress::{CollectionStats, ProgressTracker};
pub use report::{BlogRow, InsightInputs, InsightReport};
