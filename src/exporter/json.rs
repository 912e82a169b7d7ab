// file: src/exporter/json.rs
// description: json export of insight reports and collection manifests

use crate::error::{InsightError, Result};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_files: usize,
    pub files: Vec<String>,
    pub failures: Vec<String>,
}

impl ExportManifest {
    pub fn new(files: &[PathBuf], failures: Vec<String>) -> Self {
        Self {
            exported_at: Utc::now().to_rfc3339(),
            total_files: files.len(),
            files: files.iter().map(|p| p.display().to_string()).collect(),
            failures,
        }
    }
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Serializes `value` to `file_name` inside the output directory.
    pub fn export<T: Serialize>(&self, value: &T, file_name: &str, pretty: bool) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        write_json(value, &path, pretty)?;
        Ok(path)
    }

    /// Writes `manifest_{YYYYMMDD}.json` listing the files of a collection run.
    pub fn export_manifest(&self, manifest: &ExportManifest) -> Result<PathBuf> {
        let file_name = format!("manifest_{}.json", Local::now().format("%Y%m%d"));
        let path = self.export(manifest, &file_name, true)?;
        info!(
            "Manifest written: {} ({} files)",
            path.display(),
            manifest.total_files
        );
        Ok(path)
    }
}

/// Writes `value` to an explicit path, creating parent directories.
pub fn write_json<T: Serialize>(value: &T, path: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    fs::write(path, json).map_err(|source| InsightError::FileOperation {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Exported JSON to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path());
        assert!(exporter.is_ok());
    }

    #[test]
    fn test_manifest_round_trip() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let files = vec![PathBuf::from("data/a.csv"), PathBuf::from("data/b.csv")];
        let manifest = ExportManifest::new(&files, vec!["blog: timeout".to_string()]);

        let path = exporter.export_manifest(&manifest).unwrap();
        let loaded: ExportManifest =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(loaded.total_files, 2);
        assert_eq!(loaded.files[1], "data/b.csv");
        assert_eq!(loaded.failures.len(), 1);
    }

    #[test]
    fn test_write_json_compact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/report.json");

        write_json(&vec![1, 2, 3], &path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1,2,3]");
    }
}
