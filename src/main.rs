// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use chrono::Local;
use clap::{ArgAction, Parser, Subcommand};
use serde_json::Value;
use shop_insight::utils::logging::{format_error, format_step, format_success, format_warning};
use shop_insight::{
    BlogPost, Collector, Config, CsvExporter, Document, ExportManifest, GroupKey, InsightInputs,
    InsightReport, JsonExporter, KeywordExtractor, NaverClient, ProgressTracker, Target,
    Validator, aggregate_records,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "shop_insight")]
#[command(version)]
#[command(
    about = "Shopping trend, blog keyword and brand price insights from the Naver open API",
    long_about = None
)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch trend, blog and shopping data for targets and save them as CSV
    Collect {
        /// Collect a single target instead of the configured list
        #[arg(long, requires = "category_id")]
        name: Option<String>,

        #[arg(long, requires = "name")]
        category_id: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch data for one keyword and print the insight report
    Analyze {
        keyword: String,

        /// Shopping category id, enables the trend section
        #[arg(long)]
        category_id: Option<String>,

        /// Also save the shopping listings as CSV
        #[arg(long)]
        export: bool,

        /// Write the report as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },

    /// Count keywords in a saved blog search response
    Keywords {
        input: PathBuf,

        #[arg(long, default_value = "")]
        exclude: String,

        #[arg(long)]
        top: Option<usize>,
    },

    /// Aggregate prices per group in a saved shopping search response
    Aggregate {
        input: PathBuf,

        #[arg(long, default_value = "brand")]
        group_by: String,

        #[arg(long)]
        top: Option<usize>,
    },

    /// Validate configuration and API credentials
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    shop_insight::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Collect {
            name,
            category_id,
            output,
        } => {
            cmd_collect(&config, name, category_id, output, cli.color).await?;
        }
        Commands::Analyze {
            keyword,
            category_id,
            export,
            json,
        } => {
            cmd_analyze(&config, &keyword, category_id.as_deref(), export, json, cli.color)
                .await?;
        }
        Commands::Keywords {
            input,
            exclude,
            top,
        } => {
            cmd_keywords(&config, &input, &exclude, top)?;
        }
        Commands::Aggregate {
            input,
            group_by,
            top,
        } => {
            cmd_aggregate(&config, &input, &group_by, top)?;
        }
        Commands::Check => {
            cmd_check(&config)?;
        }
    }

    Ok(())
}

fn build_client(config: &Config) -> Result<NaverClient> {
    Validator::validate_credentials(&config.api).context("API credentials are not usable")?;
    Validator::validate_url(&config.api.base_url)?;
    NaverClient::new(config.api.clone()).context("Failed to create API client")
}

async fn cmd_collect(
    config: &Config,
    name: Option<String>,
    category_id: Option<String>,
    output: Option<PathBuf>,
    color: bool,
) -> Result<()> {
    let targets = match (name, category_id) {
        (Some(name), Some(category_id)) => vec![Target { name, category_id }],
        _ => config.targets.clone(),
    };

    if targets.is_empty() {
        println!("{}", format_warning("No targets configured"));
        return Ok(());
    }

    for target in &targets {
        Validator::validate_keyword(&target.name)?;
        Validator::validate_category_id(&target.category_id)?;
    }

    let client = build_client(config)?;
    let output_dir = output.unwrap_or_else(|| config.export.output_dir.clone());
    let exporter = CsvExporter::new(&output_dir).context("Failed to prepare output directory")?;

    let collector = Collector::new(&client, exporter);
    let tracker = ProgressTracker::with_color(targets.len() * 3, color);
    let stats = collector.collect(&targets, &tracker).await;

    let manifest = ExportManifest::new(&stats.files, stats.failures.clone());
    JsonExporter::new(&output_dir)?
        .export_manifest(&manifest)
        .context("Failed to write manifest")?;

    for file in &stats.files {
        println!("{}", format_success(&format!("Saved: {}", file.display())));
    }
    for failure in &stats.failures {
        println!("{}", format_error(failure));
    }
    if stats.datasets_empty > 0 {
        println!(
            "{}",
            format_warning(&format!("{} datasets had no data", stats.datasets_empty))
        );
    }

    info!(
        "Collected {} datasets ({} rows, {:.1}% succeeded) in {:.2}s",
        stats.datasets_saved,
        stats.rows_written,
        stats.success_rate(),
        stats.duration_secs
    );

    if stats.datasets_saved == 0 {
        return Err(anyhow::anyhow!("No dataset could be collected"));
    }

    Ok(())
}

async fn cmd_analyze(
    config: &Config,
    keyword: &str,
    category_id: Option<&str>,
    export: bool,
    json: Option<PathBuf>,
    color: bool,
) -> Result<()> {
    Validator::validate_keyword(keyword)?;
    if let Some(id) = category_id {
        Validator::validate_category_id(id)?;
    }

    let client = build_client(config)?;
    let total_steps = 2 + usize::from(export) + usize::from(json.is_some());
    let mut step = 1;

    println!("{}", format_step(step, total_steps, &format!("Fetching data for '{}'", keyword)));
    let inputs = InsightInputs::fetch(&client, keyword, category_id)
        .await
        .context("Failed to fetch data")?;

    step += 1;
    println!("{}", format_step(step, total_steps, "Building report"));
    let report = InsightReport::build(keyword, category_id, &inputs, &config.analysis)?;

    if export && inputs.shop.is_empty() {
        step += 1;
        println!(
            "{}",
            format_step(step, total_steps, "No shopping listings, nothing to export")
        );
    } else if export {
        step += 1;
        let exporter = CsvExporter::new(&config.export.output_dir)?;
        let file_name = format!(
            "{}_shopping_data_{}.csv",
            Validator::sanitize_file_component(keyword),
            Local::now().format("%Y%m%d")
        );
        let path = exporter.export_named(&file_name, &inputs.shop)?;
        println!(
            "{}",
            format_step(step, total_steps, &format!("Saved {}", path.display()))
        );
    }

    if let Some(path) = json {
        step += 1;
        shop_insight::exporter::json::write_json(&report, &path, true)
            .context("Failed to write report")?;
        println!(
            "{}",
            format_step(step, total_steps, &format!("Report written to {}", path.display()))
        );
    }

    println!("\n{}", report.render(color));
    Ok(())
}

/// Accepts either a bare array or a search response with an `items` array.
fn read_items(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut object) => match object.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(anyhow::anyhow!(
                "{} has no 'items' array",
                path.display()
            )),
        },
        _ => Err(anyhow::anyhow!(
            "{} must contain a JSON array or an object with 'items'",
            path.display()
        )),
    }
}

fn cmd_keywords(config: &Config, input: &Path, exclude: &str, top: Option<usize>) -> Result<()> {
    let posts: Vec<BlogPost> = read_items(input)?
        .into_iter()
        .map(serde_json::from_value::<BlogPost>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Blog items have an unexpected shape")?;

    let documents: Vec<Document> = posts.iter().map(Document::from).collect();
    let extractor = KeywordExtractor::with_script_class(&config.analysis.script_class)?;
    let top = top.unwrap_or(config.analysis.top_keywords);

    let keywords = extractor.extract_top_keywords(&documents, exclude, top);
    info!("{} documents, {} keywords", documents.len(), keywords.len());

    for (rank, keyword) in keywords.iter().enumerate() {
        println!("{:>3}. {}\t{}", rank + 1, keyword.token, keyword.count);
    }

    Ok(())
}

fn cmd_aggregate(config: &Config, input: &Path, group_by: &str, top: Option<usize>) -> Result<()> {
    let key: GroupKey = group_by.parse()?;
    let records = read_items(input)?;
    let top = top.unwrap_or(config.analysis.top_brands);

    let stats = aggregate_records(&records, key, top)
        .with_context(|| format!("Failed to aggregate {}", input.display()))?;

    println!("{}\titems\tmean\tmin\tmax", key);
    for group in stats {
        let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |p| format!("{:.0}", p));
        println!(
            "{}\t{}\t{}\t{}\t{}",
            if group.brand.is_empty() { "(none)" } else { group.brand.as_str() },
            group.item_count,
            fmt(group.mean_price),
            fmt(group.min_price),
            fmt(group.max_price)
        );
    }

    Ok(())
}

fn cmd_check(config: &Config) -> Result<()> {
    config.validate()?;
    println!("{}", format_success("Configuration is valid"));

    Validator::validate_url(&config.api.base_url)?;

    match Validator::validate_credentials(&config.api) {
        Ok(()) => println!("{}", format_success("API credentials are set")),
        Err(e) => {
            println!("{}", format_error(&e.to_string()));
            return Err(e.into());
        }
    }

    println!(
        "{}",
        format_success(&format!("{} collection targets configured", config.targets.len()))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_single_target_needs_both_flags() {
        let missing_name =
            Cli::try_parse_from(["shop_insight", "collect", "--category-id", "50000008"]);
        assert!(missing_name.is_err());

        let missing_id = Cli::try_parse_from(["shop_insight", "collect", "--name", "오메가3"]);
        assert!(missing_id.is_err());

        let cli = Cli::try_parse_from([
            "shop_insight",
            "collect",
            "--name",
            "오메가3",
            "--category-id",
            "50000008",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect { name: Some(_), category_id: Some(_), .. }
        ));
    }

    #[test]
    fn test_collect_without_flags_uses_configured_targets() {
        let cli = Cli::try_parse_from(["shop_insight", "collect"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Collect { name: None, category_id: None, .. }
        ));
    }
}
