// file: src/utils/validation.rs
// description: input validation for credentials, keywords and file names
// reference: input validation patterns

use crate::config::ApiConfig;
use crate::error::{InsightError, Result};

const PLACEHOLDER_MARKERS: [&str; 2] = ["YOUR_CLIENT_ID", "YOUR_CLIENT_SECRET"];

pub struct Validator;

impl Validator {
    /// Rejects missing or template credentials before any request is made.
    pub fn validate_credentials(api: &ApiConfig) -> Result<()> {
        for (name, value) in [
            ("client_id", &api.client_id),
            ("client_secret", &api.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(InsightError::Validation(format!(
                    "API {} is not set (NAVER_CLIENT_ID / NAVER_CLIENT_SECRET or .env)",
                    name
                )));
            }
            if PLACEHOLDER_MARKERS.iter().any(|marker| value.contains(marker)) {
                return Err(InsightError::Validation(format!(
                    "API {} still holds the placeholder value",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(InsightError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_keyword(keyword: &str) -> Result<()> {
        if keyword.trim().is_empty() {
            return Err(InsightError::Validation("Keyword is empty".to_string()));
        }
        Ok(())
    }

    /// Shopping category ids are numeric, e.g. `50000008`.
    pub fn validate_category_id(category_id: &str) -> Result<()> {
        if category_id.is_empty() || !category_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(InsightError::Validation(format!(
                "Category id must be numeric: {}",
                category_id
            )));
        }
        Ok(())
    }

    /// Makes a keyword safe to embed in a file name.
    pub fn sanitize_file_component(text: &str) -> String {
        text.trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_whitespace() => '_',
                c => c,
            })
            .collect()
    }
}
