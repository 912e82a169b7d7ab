// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::analysis::patterns::script_filter;
use crate::error::{InsightError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub export: ExportConfig,
    /// Falls back to the built-in targets when no file lists any
    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,
}

/// Connection settings and credentials for the Naver open API.
///
/// The client receives this by value at construction, so tests can hand in
/// mock credentials and a local `base_url`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
    /// Results requested per search call (the API caps this at 100)
    pub display: u32,
    pub timeout_secs: u64,
    /// Length of the shopping trend window ending today
    pub trend_days: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Regex character-class body for the script whose words are counted
    pub script_class: String,
    pub top_keywords: usize,
    pub top_brands: usize,
    pub brand_share_top: usize,
    pub histogram_bins: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Target {
    pub name: String,
    pub category_id: String,
}

fn default_targets() -> Vec<Target> {
    [
        ("오메가3", "50000008"),
        ("비타민d", "50007042"),
        ("선글라스", "50000183"),
    ]
    .into_iter()
    .map(|(name, category_id)| Target {
        name: name.to_string(),
        category_id: category_id.to_string(),
    })
    .collect()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            base_url: "https://openapi.naver.com".to_string(),
            display: 100,
            timeout_secs: 30,
            trend_days: 365,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            script_class: "가-힣".to_string(),
            top_keywords: 15,
            top_brands: 10,
            brand_share_top: 8,
            histogram_bins: 20,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    /// Loads `path`, or `config/default.toml` when present, under the
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_layered(path, true),
            None => Self::load_layered(Path::new(DEFAULT_CONFIG_PATH), false),
        }
    }

    fn load_layered(file: &Path, required: bool) -> Result<Self> {
        dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::from(file).required(required))
            .add_source(
                config::Environment::with_prefix("SHOP_INSIGHT")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings = builder
            .build()
            .map_err(|e| InsightError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| InsightError::Config(e.to_string()))?;

        config.apply_credential_env();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::default(),
            analysis: AnalysisConfig::default(),
            export: ExportConfig::default(),
            targets: default_targets(),
        }
    }

    /// `NAVER_CLIENT_ID` / `NAVER_CLIENT_SECRET` win over file values when set.
    fn apply_credential_env(&mut self) {
        if let Ok(id) = std::env::var("NAVER_CLIENT_ID")
            && !id.trim().is_empty()
        {
            self.api.client_id = id;
        }
        if let Ok(secret) = std::env::var("NAVER_CLIENT_SECRET")
            && !secret.trim().is_empty()
        {
            self.api.client_secret = secret;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.display == 0 || self.api.display > 100 {
            return Err(InsightError::Config(
                "api.display must be between 1 and 100".to_string(),
            ));
        }

        if self.api.trend_days == 0 {
            return Err(InsightError::Config(
                "api.trend_days must be greater than 0".to_string(),
            ));
        }

        if self.analysis.top_keywords == 0
            || self.analysis.top_brands == 0
            || self.analysis.brand_share_top == 0
        {
            return Err(InsightError::Config(
                "analysis top-N limits must be greater than 0".to_string(),
            ));
        }

        if self.analysis.histogram_bins == 0 {
            return Err(InsightError::Config(
                "histogram_bins must be greater than 0".to_string(),
            ));
        }

        script_filter(&self.analysis.script_class).map_err(|e| {
            InsightError::Config(format!(
                "script_class '{}' is not a valid character class: {}",
                self.analysis.script_class, e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.targets.len(), 3);
        assert_eq!(config.analysis.top_keywords, 15);
    }

    #[test]
    fn test_validate_rejects_display_out_of_range() {
        let mut config = Config::default_config();
        config.api.display = 0;
        assert!(config.validate().is_err());

        config.api.display = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_script_class() {
        let mut config = Config::default_config();
        config.analysis.script_class = "z-a".to_string();
        assert!(matches!(config.validate(), Err(InsightError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(
            &path,
            r#"
[api]
display = 50
base_url = "http://127.0.0.1:9"

[analysis]
top_keywords = 5

[[targets]]
name = "선글라스"
category_id = "50000183"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.api.display, 50);
        assert_eq!(config.api.base_url, "http://127.0.0.1:9");
        assert_eq!(config.analysis.top_keywords, 5);
        assert_eq!(config.analysis.top_brands, 10);
        assert_eq!(config.targets.len(), 1);
        assert_eq!(config.export.output_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_missing_default_file_keeps_builtin_targets() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("config/default.toml");

        let config = Config::load_layered(&missing, false).unwrap();
        assert_eq!(config.targets, Config::default_config().targets);
        assert_eq!(config.targets.len(), 3);
        assert_eq!(config.api.display, 100);
    }

    #[test]
    fn test_file_without_targets_uses_builtin_targets() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "[analysis]\ntop_brands = 3\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.analysis.top_brands, 3);
        assert_eq!(config.targets[0].name, "오메가3");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(missing.as_path())),
            Err(InsightError::Config(_))
        ));
    }
}
