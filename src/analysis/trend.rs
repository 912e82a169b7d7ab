// file: src/analysis/trend.rs
// description: summary figures for a shopping insight trend series

use crate::models::{TrendPoint, TrendSummary};

/// Max, min and mean ratio with the series ordered newest first.
/// Returns `None` for an empty series.
pub fn summarize_trend(points: &[TrendPoint]) -> Option<TrendSummary> {
    if points.is_empty() {
        return None;
    }

    let max_ratio = points.iter().map(|p| p.ratio).fold(f64::MIN, f64::max);
    let min_ratio = points.iter().map(|p| p.ratio).fold(f64::MAX, f64::min);
    let mean_ratio = points.iter().map(|p| p.ratio).sum::<f64>() / points.len() as f64;

    let mut ordered = points.to_vec();
    // ISO dates sort lexicographically
    ordered.sort_by(|a, b| b.period.cmp(&a.period));

    Some(TrendSummary {
        max_ratio,
        min_ratio,
        mean_ratio,
        points: ordered,
    })
}
