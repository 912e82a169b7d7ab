// file: src/pipeline/report.rs
// description: insight report assembled from trend, blog and shopping data
// reference: combines the analysis functions into one serializable report

use crate::analysis::{
    GroupKey, KeywordExtractor, aggregate_by_group, brand_share, describe_prices,
    price_histogram, summarize_trend,
};
use crate::client::NaverClient;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{
    BlogPost, BrandShare, BrandStats, Document, KeywordCount, PriceBucket, PriceSummary,
    PricedItem, ShopItem, TrendPoint, TrendSummary,
};
use crate::utils::telemetry::OperationTimer;
use chrono::Utc;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::time::Duration;
use tracing::info;

const FETCH_SLOW_SECS: u64 = 10;
const HISTOGRAM_WIDTH: usize = 30;

/// Raw data fetched for one keyword.
#[derive(Debug, Clone, Default)]
pub struct InsightInputs {
    pub trend: Vec<TrendPoint>,
    pub blog: Vec<BlogPost>,
    pub shop: Vec<ShopItem>,
}

impl InsightInputs {
    /// Fetches the three datasets concurrently. The trend series is only
    /// requested when a category id is given.
    pub async fn fetch(
        client: &NaverClient,
        keyword: &str,
        category_id: Option<&str>,
    ) -> Result<Self> {
        let timer = OperationTimer::new("fetch");
        let trend = async {
            match category_id {
                Some(id) => client.shopping_insight(keyword, id).await,
                None => Ok(Vec::new()),
            }
        };

        let (trend, blog, shop) = futures::try_join!(
            trend,
            client.blog_search(keyword),
            client.shopping_search(keyword)
        )?;

        timer.warn_if_slow(Duration::from_secs(FETCH_SLOW_SECS));
        timer.finish();

        info!(
            "Fetched {} trend points, {} blog posts, {} shop items for '{}'",
            trend.len(),
            blog.len(),
            shop.len(),
            keyword
        );

        Ok(Self { trend, blog, shop })
    }
}

/// Blog post row with highlight markup removed from the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogRow {
    pub title: String,
    pub bloggername: String,
    pub postdate: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    pub keyword: String,
    pub category_id: Option<String>,
    pub generated_at: String,
    pub trend: Option<TrendSummary>,
    pub top_keywords: Vec<KeywordCount>,
    pub blog_posts: Vec<BlogRow>,
    pub shop_item_count: usize,
    pub brand_stats: Vec<BrandStats>,
    pub brand_share: Vec<BrandShare>,
    pub price_summary: Option<PriceSummary>,
    pub price_histogram: Vec<PriceBucket>,
}

impl InsightReport {
    pub fn build(
        keyword: &str,
        category_id: Option<&str>,
        inputs: &InsightInputs,
        config: &AnalysisConfig,
    ) -> Result<Self> {
        let extractor = KeywordExtractor::with_script_class(&config.script_class)?;
        let documents: Vec<Document> = inputs.blog.iter().map(Document::from).collect();
        let top_keywords =
            extractor.extract_top_keywords(&documents, keyword, config.top_keywords);

        let blog_posts = inputs
            .blog
            .iter()
            .map(|post| BlogRow {
                title: post.display_title(),
                bloggername: post.bloggername.clone(),
                postdate: post.postdate.clone(),
                link: post.link.clone(),
            })
            .collect();

        let items: Vec<PricedItem> = inputs.shop.iter().map(PricedItem::from).collect();

        Ok(Self {
            keyword: keyword.to_string(),
            category_id: category_id.map(str::to_string),
            generated_at: Utc::now().to_rfc3339(),
            trend: summarize_trend(&inputs.trend),
            top_keywords,
            blog_posts,
            shop_item_count: items.len(),
            brand_stats: aggregate_by_group(&items, GroupKey::Brand, config.top_brands),
            brand_share: brand_share(&items, config.brand_share_top),
            price_summary: describe_prices(&items),
            price_histogram: price_histogram(&items, config.histogram_bins),
        })
    }

    /// Plain-text rendition of the report for the terminal.
    pub fn render(&self, colored: bool) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{}",
            heading(&format!("Insight report for '{}'", self.keyword), colored)
        );
        let _ = writeln!(out, "Generated at {}\n", self.generated_at);

        self.render_trend(&mut out, colored);
        self.render_keywords(&mut out, colored);
        self.render_blog(&mut out, colored);
        self.render_shopping(&mut out, colored);

        out
    }

    fn render_trend(&self, out: &mut String, colored: bool) {
        let _ = writeln!(out, "{}", heading("Shopping search trend", colored));
        match &self.trend {
            Some(trend) => {
                let _ = writeln!(
                    out,
                    "  max {:.2} | min {:.2} | mean {:.2}",
                    trend.max_ratio, trend.min_ratio, trend.mean_ratio
                );
                for point in trend.points.iter().take(10) {
                    let _ = writeln!(out, "  {:<12} {:>8.2}", point.period, point.ratio);
                }
                if trend.points.len() > 10 {
                    let _ = writeln!(out, "  ... {} more periods", trend.points.len() - 10);
                }
            }
            None => {
                let _ = writeln!(out, "  no trend data (pass a category id)");
            }
        }
        out.push('\n');
    }

    fn render_keywords(&self, out: &mut String, colored: bool) {
        let _ = writeln!(
            out,
            "{}",
            heading(
                &format!("Top {} blog keywords", self.top_keywords.len()),
                colored
            )
        );
        for (rank, keyword) in self.top_keywords.iter().enumerate() {
            let _ = writeln!(out, "  {:>2}. {} ({})", rank + 1, keyword.token, keyword.count);
        }
        out.push('\n');
    }

    fn render_blog(&self, out: &mut String, colored: bool) {
        let _ = writeln!(out, "{}", heading("Latest blog posts", colored));
        for row in self.blog_posts.iter().take(10) {
            let _ = writeln!(out, "  [{}] {} - {}", row.postdate, row.title, row.bloggername);
        }
        out.push('\n');
    }

    fn render_shopping(&self, out: &mut String, colored: bool) {
        let _ = writeln!(
            out,
            "{}",
            heading(
                &format!("Shopping market ({} listings)", self.shop_item_count),
                colored
            )
        );

        if let Some(summary) = &self.price_summary {
            let _ = writeln!(
                out,
                "  price min {:.0} | p25 {:.0} | median {:.0} | p75 {:.0} | max {:.0} | mean {:.0}",
                summary.min, summary.p25, summary.median, summary.p75, summary.max, summary.mean
            );
        }

        let _ = writeln!(
            out,
            "  {:<20} {:>6} {:>12} {:>12} {:>12}",
            "brand", "items", "mean", "min", "max"
        );
        for stats in &self.brand_stats {
            let _ = writeln!(
                out,
                "  {:<20} {:>6} {:>12} {:>12} {:>12}",
                brand_label(&stats.brand),
                stats.item_count,
                format_price(stats.mean_price),
                format_price(stats.min_price),
                format_price(stats.max_price)
            );
        }

        if !self.brand_share.is_empty() {
            let _ = writeln!(out, "  brand share:");
            for share in &self.brand_share {
                let _ = writeln!(
                    out,
                    "    {:<20} {:>5.1}%",
                    brand_label(&share.brand),
                    share.share
                );
            }
        }

        self.render_histogram(out);
    }

    fn render_histogram(&self, out: &mut String) {
        let Some(peak) = self.price_histogram.iter().map(|b| b.count).max() else {
            return;
        };

        let _ = writeln!(out, "  price distribution:");
        for bucket in self.price_histogram.iter().filter(|b| b.count > 0) {
            let width = (bucket.count * HISTOGRAM_WIDTH).div_ceil(peak.max(1));
            let _ = writeln!(
                out,
                "    {:>10.0} - {:<10.0} {:>4} {}",
                bucket.lower,
                bucket.upper,
                bucket.count,
                "#".repeat(width)
            );
        }
    }
}

fn brand_label(brand: &str) -> &str {
    if brand.is_empty() { "(no brand)" } else { brand }
}

fn heading(text: &str, colored: bool) -> String {
    if colored {
        format!("== {} ==", text).cyan().bold().to_string()
    } else {
        format!("== {} ==", text)
    }
}

fn format_price(price: Option<f64>) -> String {
    price.map_or_else(|| "-".to_string(), |p| format!("{:.0}", p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::test_support::serve_forever;

    fn shop_item(brand: &str, lprice: &str) -> ShopItem {
        ShopItem {
            brand: brand.to_string(),
            lprice: Some(lprice.to_string()),
            ..Default::default()
        }
    }

    fn sample_inputs() -> InsightInputs {
        InsightInputs {
            trend: vec![
                TrendPoint {
                    period: "2024-01-01".to_string(),
                    ratio: 20.0,
                },
                TrendPoint {
                    period: "2024-01-02".to_string(),
                    ratio: 60.0,
                },
            ],
            blog: vec![
                BlogPost {
                    title: "<b>오메가3</b> 효과 후기".to_string(),
                    description: "오메가3 효과 좋아요".to_string(),
                    bloggername: "건강일기".to_string(),
                    postdate: "20240102".to_string(),
                    ..Default::default()
                },
                BlogPost {
                    title: "오메가3 추천".to_string(),
                    description: "<b>효과</b> 후기".to_string(),
                    ..Default::default()
                },
            ],
            shop: vec![
                shop_item("A", "100"),
                shop_item("A", "300"),
                shop_item("B", "abc"),
                shop_item("", "50"),
            ],
        }
    }

    #[test]
    fn test_build_report() {
        let config = AnalysisConfig::default();
        let report =
            InsightReport::build("오메가", Some("50000008"), &sample_inputs(), &config).unwrap();

        let trend = report.trend.as_ref().unwrap();
        assert_eq!(trend.max_ratio, 60.0);
        assert_eq!(trend.points[0].period, "2024-01-02");

        assert_eq!(report.top_keywords[0], KeywordCount::new("효과", 3));
        assert_eq!(report.top_keywords[1], KeywordCount::new("후기", 2));
        assert!(report.top_keywords.iter().all(|k| k.token != "오메가"));

        assert_eq!(report.blog_posts[0].title, "오메가3 효과 후기");
        assert_eq!(report.shop_item_count, 4);

        assert_eq!(report.brand_stats[0].brand, "A");
        assert_eq!(report.brand_stats[0].mean_price, Some(200.0));
        assert_eq!(report.brand_share.len(), 3);
        assert_eq!(report.brand_share[1].brand, "");
        assert_eq!(report.price_histogram.iter().map(|b| b.count).sum::<usize>(), 3);

        let summary = report.price_summary.as_ref().unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, 50.0);
    }

    #[test]
    fn test_build_without_data() {
        let config = AnalysisConfig::default();
        let report =
            InsightReport::build("없음", None, &InsightInputs::default(), &config).unwrap();

        assert!(report.trend.is_none());
        assert!(report.top_keywords.is_empty());
        assert!(report.brand_stats.is_empty());
        assert!(report.price_summary.is_none());
        assert!(report.render(false).contains("no trend data"));
    }

    #[test]
    fn test_render_plain_text() {
        let config = AnalysisConfig::default();
        let report = InsightReport::build("오메가", None, &sample_inputs(), &config).unwrap();
        let text = report.render(false);

        assert!(text.contains("== Insight report for '오메가' =="));
        assert!(text.contains("효과 (3)"));
        assert!(text.contains("(no brand)"));
        assert!(!text.contains('\u{1b}'));

        assert!(text.contains("price distribution:"));
        let peak_line = text
            .lines()
            .find(|line| line.trim_start().starts_with("50 -"))
            .unwrap();
        assert!(peak_line.ends_with(&"#".repeat(HISTOGRAM_WIDTH)));
    }

    #[test]
    fn test_render_without_prices_has_no_histogram() {
        let config = AnalysisConfig::default();
        let inputs = InsightInputs {
            shop: vec![shop_item("A", "n/a")],
            ..Default::default()
        };
        let report = InsightReport::build("가나", None, &inputs, &config).unwrap();

        assert!(report.price_histogram.is_empty());
        assert!(!report.render(false).contains("price distribution:"));
    }

    #[tokio::test]
    async fn test_fetch_skips_trend_without_category() {
        let body = r#"{"results":[{"data":[{"period":"2024-01-01","ratio":3.0}]}],
            "items":[{"title":"<b>가나</b> 다라","brand":"A","lprice":"10"}]}"#;
        let base_url = serve_forever(body).await;
        let client = NaverClient::new(ApiConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            base_url,
            ..Default::default()
        })
        .unwrap();

        let inputs = InsightInputs::fetch(&client, "가나", None).await.unwrap();
        assert!(inputs.trend.is_empty());
        assert_eq!(inputs.blog.len(), 1);
        assert_eq!(inputs.shop[0].brand, "A");

        let inputs = InsightInputs::fetch(&client, "가나", Some("50000008"))
            .await
            .unwrap();
        assert_eq!(inputs.trend.len(), 1);
    }

    #[test]
    fn test_report_serializes() {
        let config = AnalysisConfig::default();
        let report = InsightReport::build("오메가", None, &sample_inputs(), &config).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["keyword"], "오메가");
        assert_eq!(json["brand_stats"][0]["item_count"], 2);
        assert_eq!(json["brand_stats"][1]["brand"], "");
        assert!(json["brand_stats"][2]["mean_price"].is_null());
    }
}
