// file: src/pipeline/collector.rs
// description: collection run that fetches every target and saves csv datasets
// reference: per-target fetch with failures recorded instead of aborting

use crate::client::NaverClient;
use crate::config::Target;
use crate::error::Result;
use crate::exporter::{CsvExporter, DatasetKind};
use crate::pipeline::progress::{CollectionStats, ProgressTracker};
use crate::utils::telemetry::OperationTimer;
use serde::Serialize;
use tracing::{error, info, warn};

pub struct Collector<'a> {
    client: &'a NaverClient,
    exporter: CsvExporter,
}

impl<'a> Collector<'a> {
    pub fn new(client: &'a NaverClient, exporter: CsvExporter) -> Self {
        Self { client, exporter }
    }

    /// Fetches trend, blog and shopping data for each target and writes one
    /// csv per dataset. Empty datasets are counted but not written. A failed
    /// fetch or write is recorded and the run moves on.
    pub async fn collect(&self, targets: &[Target], tracker: &ProgressTracker) -> CollectionStats {
        let timer = OperationTimer::new("collection");

        for target in targets {
            info!("Collecting data for: {}", target.name);
            tracker.set_message(target.name.clone());

            let (trend, blog, shop) = futures::join!(
                self.client
                    .shopping_insight(&target.name, &target.category_id),
                self.client.blog_search(&target.name),
                self.client.shopping_search(&target.name)
            );

            self.save(tracker, &target.name, DatasetKind::Trend, trend);
            self.save(tracker, &target.name, DatasetKind::Blog, blog);
            self.save(tracker, &target.name, DatasetKind::Shopping, shop);
        }

        tracker.finish();
        let stats = tracker.get_stats();
        timer.finish_with_count(stats.datasets_saved);
        stats
    }

    fn save<T: Serialize>(
        &self,
        tracker: &ProgressTracker,
        category: &str,
        kind: DatasetKind,
        fetched: Result<Vec<T>>,
    ) {
        let outcome = fetched.and_then(|rows| {
            if rows.is_empty() {
                return Ok(None);
            }
            let path = self.exporter.export(category, kind, &rows)?;
            Ok(Some((path, rows.len())))
        });

        match outcome {
            Ok(Some((path, rows))) => tracker.record_saved(path, rows),
            Ok(None) => {
                info!("No {} data for {}, nothing saved", kind.label(), category);
                tracker.record_empty();
            }
            Err(e) => {
                if e.is_remote() {
                    warn!("Fetching {} data for {} failed: {}", kind.label(), category, e);
                } else {
                    error!("Failed to save {} data for {}: {}", kind.label(), category, e);
                }
                tracker.record_failed(format!("{} {}: {}", category, kind.label(), e));
            }
        }
    }
}
