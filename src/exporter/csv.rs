// file: src/exporter/csv.rs
// description: csv export of collected datasets with dated file names
// reference: https://docs.rs/csv

use crate::error::{InsightError, Result};
use crate::utils::Validator;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Spreadsheet tools need the BOM to detect UTF-8 Korean text.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Kind of collected dataset, used as the label part of file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Trend,
    Blog,
    Shopping,
}

impl DatasetKind {
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Trend => "trend",
            DatasetKind::Blog => "blog",
            DatasetKind::Shopping => "shopping",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| InsightError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `{category}_{label}_{YYYYMMDD}.csv`, with path separators and other
    /// unsafe characters in `category` replaced.
    pub fn file_name(category: &str, label: &str, date: NaiveDate) -> String {
        format!(
            "{}_{}_{}.csv",
            Validator::sanitize_file_component(category),
            label,
            date.format("%Y%m%d")
        )
    }

    /// Writes `rows` under today's dated name for `category` and `kind`.
    pub fn export<T: Serialize>(
        &self,
        category: &str,
        kind: DatasetKind,
        rows: &[T],
    ) -> Result<PathBuf> {
        let file_name = Self::file_name(category, kind.label(), Local::now().date_naive());
        self.export_named(&file_name, rows)
    }

    /// Header names come from the first row, so an empty `rows` is rejected
    /// rather than written as a header-less file.
    pub fn export_named<T: Serialize>(&self, file_name: &str, rows: &[T]) -> Result<PathBuf> {
        if rows.is_empty() {
            return Err(InsightError::InvalidInput(format!(
                "no rows to export to {}",
                file_name
            )));
        }

        let path = self.output_dir.join(file_name);

        let mut file = File::create(&path).map_err(|source| InsightError::FileOperation {
            path: path.clone(),
            source,
        })?;
        file.write_all(UTF8_BOM)?;

        let mut writer = ::csv::Writer::from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        info!("Saved: {} ({} rows)", path.display(), rows.len());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShopItem, TrendPoint};
    use tempfile::tempdir;

    #[test]
    fn test_file_name_convention() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            CsvExporter::file_name("오메가3", "trend", date),
            "오메가3_trend_20240309.csv"
        );
        assert_eq!(
            CsvExporter::file_name("단백질 쉐이크/바", "blog", date),
            "단백질_쉐이크_바_blog_20240309.csv"
        );
    }

    #[test]
    fn test_export_rejects_empty_rows() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let rows: Vec<TrendPoint> = Vec::new();

        let result = exporter.export("선글라스", DatasetKind::Trend, &rows);
        assert!(matches!(result, Err(InsightError::InvalidInput(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_exporter_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let exporter = CsvExporter::new(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(exporter.output_dir(), nested.as_path());
    }

    #[test]
    fn test_export_writes_bom_header_and_rows() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let rows = vec![
            TrendPoint {
                period: "2024-01-01".to_string(),
                ratio: 12.5,
            },
            TrendPoint {
                period: "2024-01-02".to_string(),
                ratio: 100.0,
            },
        ];

        let path = exporter.export("선글라스", DatasetKind::Trend, &rows).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("선글라스_trend_"));
        assert!(name.ends_with(".csv"));

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["period,ratio", "2024-01-01,12.5", "2024-01-02,100.0"]);
    }

    #[test]
    fn test_export_shop_items_uses_api_column_names() {
        let dir = tempdir().unwrap();
        let exporter = CsvExporter::new(dir.path()).unwrap();
        let rows = vec![ShopItem {
            title: "오메가3, 180캡슐".to_string(),
            lprice: Some("23900".to_string()),
            mall_name: "네이버".to_string(),
            product_id: "1".to_string(),
            ..Default::default()
        }];

        let path = exporter.export_named("items.csv", &rows).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let text = text.trim_start_matches('\u{feff}');

        let header = text.lines().next().unwrap();
        assert!(header.starts_with("title,link,image,lprice,hprice,mallName,productId"));
        assert!(text.contains("\"오메가3, 180캡슐\""));
    }
}
