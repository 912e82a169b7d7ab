// file: src/models/trend.rs
// description: shopping insight trend series models
// reference: https://developers.naver.com/docs/serviceapi/datalab/shopping/shopping.md

use serde::{Deserialize, Serialize};

/// Relative search volume for one period (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub max_ratio: f64,
    pub min_ratio: f64,
    pub mean_ratio: f64,
    /// Newest period first
    pub points: Vec<TrendPoint>,
}
