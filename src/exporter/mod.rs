// file: src/exporter/mod.rs
// description: file export module exports
// reference: internal module structure

pub mod csv;
pub mod json;

pub use self::csv::{CsvExporter, DatasetKind};
pub use self::json::{ExportManifest, JsonExporter};
