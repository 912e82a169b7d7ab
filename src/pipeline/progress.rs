// file: src/pipeline/progress.rs
// description: progress tracking and statistics for collection runs
// reference: uses indicatif for progress bars and tracks dataset counts

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct CollectionStats {
    pub datasets_saved: usize,
    pub datasets_failed: usize,
    /// Fetched fine but had no rows, so nothing was written
    pub datasets_empty: usize,
    pub rows_written: u64,
    pub duration_secs: f64,
    pub files: Vec<PathBuf>,
    pub failures: Vec<String>,
}

impl CollectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_rate(&self) -> f64 {
        let total = self.datasets_saved + self.datasets_failed;
        if total == 0 {
            return 0.0;
        }
        (self.datasets_saved as f64 / total as f64) * 100.0
    }

    pub fn rows_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.rows_written as f64 / self.duration_secs
    }
}

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    datasets_saved: Arc<AtomicUsize>,
    datasets_failed: Arc<AtomicUsize>,
    datasets_empty: Arc<AtomicUsize>,
    rows_written: Arc<AtomicU64>,
    files: Mutex<Vec<PathBuf>>,
    failures: Mutex<Vec<String>>,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn new(total_datasets: usize) -> Self {
        Self::with_color(total_datasets, true)
    }

    pub fn with_color(total_datasets: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_datasets as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            datasets_saved: Arc::new(AtomicUsize::new(0)),
            datasets_failed: Arc::new(AtomicUsize::new(0)),
            datasets_empty: Arc::new(AtomicUsize::new(0)),
            rows_written: Arc::new(AtomicU64::new(0)),
            files: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            start_time: Instant::now(),
        }
    }

    /// Tracker that draws nothing, for tests and non-interactive runs.
    pub fn hidden(total_datasets: usize) -> Self {
        let tracker = Self::with_color(total_datasets, false);
        tracker.main_bar.set_draw_target(ProgressDrawTarget::hidden());
        tracker.detail_bar.set_draw_target(ProgressDrawTarget::hidden());
        tracker
    }

    pub fn record_saved(&self, path: PathBuf, rows: usize) {
        self.datasets_saved.fetch_add(1, Ordering::SeqCst);
        self.rows_written.fetch_add(rows as u64, Ordering::SeqCst);
        if let Ok(mut files) = self.files.lock() {
            files.push(path);
        }
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn record_failed(&self, reason: String) {
        self.datasets_failed.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(reason);
        }
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn record_empty(&self) {
        self.datasets_empty.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.main_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Collection complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> CollectionStats {
        CollectionStats {
            datasets_saved: self.datasets_saved.load(Ordering::SeqCst),
            datasets_failed: self.datasets_failed.load(Ordering::SeqCst),
            datasets_empty: self.datasets_empty.load(Ordering::SeqCst),
            rows_written: self.rows_written.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs_f64(),
            files: self.files.lock().map(|f| f.clone()).unwrap_or_default(),
            failures: self.failures.lock().map(|f| f.clone()).unwrap_or_default(),
        }
    }

    fn update_detail_bar(&self) {
        let rows = self.rows_written.load(Ordering::SeqCst);
        let failed = self.datasets_failed.load(Ordering::SeqCst);
        let empty = self.datasets_empty.load(Ordering::SeqCst);

        self.detail_bar.set_message(format!(
            "Rows: {} | Failed: {} | No data: {}",
            rows, failed, empty
        ));
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let (template, chars) = if colored {
        (
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            "█▓▒░",
        )
    } else {
        ("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}", "=>-")
    };

    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars(chars));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_stats_calculations() {
        let mut stats = CollectionStats::new();
        stats.datasets_saved = 8;
        stats.datasets_failed = 1;
        stats.rows_written = 500;
        stats.duration_secs = 5.0;

        assert_eq!(stats.rows_per_second(), 100.0);
        assert!((stats.success_rate() - 88.888).abs() < 0.01);
    }

    #[test]
    fn test_collection_stats_empty() {
        let stats = CollectionStats::new();
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.rows_per_second(), 0.0);
    }

    #[test]
    fn test_progress_tracker_records() {
        let tracker = ProgressTracker::hidden(4);

        tracker.record_saved(PathBuf::from("a.csv"), 100);
        tracker.record_saved(PathBuf::from("b.csv"), 20);
        tracker.record_failed("blog: timeout".to_string());
        tracker.record_empty();

        let stats = tracker.get_stats();
        assert_eq!(stats.datasets_saved, 2);
        assert_eq!(stats.datasets_failed, 1);
        assert_eq!(stats.datasets_empty, 1);
        assert_eq!(stats.rows_written, 120);
        assert_eq!(stats.files, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(stats.failures, vec!["blog: timeout".to_string()]);
    }
}
