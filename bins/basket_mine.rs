//! Frequent itemsets and association rules CLI
//!
//! Usage:
//!   basket_mine --config config/basket.toml
//!   basket_mine --input data/transactions.csv --min-support 0.2 --min-confidence 0.5
//!   basket_mine --min-support 0.2 --min-confidence 0.5 --rule-source all-levels --output-dir out

use anyhow::Result;
use basket::config::{Config, ThresholdsConfig};
use basket::dataset::load_transactions;
use basket::mining::RuleSource;
use basket::outputs::{write_itemsets_parquet, write_rules_jsonl};
use basket::session::Session;
use chrono::Utc;
use clap::Parser;
use std::path::Path;

const DEFAULT_CONFIG: &str = "config/basket.toml";

#[derive(Parser)]
#[command(name = "basket_mine")]
#[command(about = "Frequent itemsets and association rules from a transaction CSV")]
struct Cli {
    /// Config file (defaults to config/basket.toml when present)
    #[arg(long)]
    config: Option<String>,
    /// Transaction CSV, overrides the config
    #[arg(long)]
    input: Option<String>,
    /// Minimum support fraction [0, 1]
    #[arg(long, requires = "min_confidence")]
    min_support: Option<f64>,
    /// Minimum confidence fraction (0, 1]
    #[arg(long, requires = "min_support")]
    min_confidence: Option<f64>,
    #[arg(long, value_enum)]
    rule_source: Option<RuleSource>,
    /// Count every joined candidate, skipping the subset check
    #[arg(long)]
    no_prune: bool,
    /// Write rules and itemsets under this directory (one-shot runs only)
    #[arg(long)]
    output_dir: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(DEFAULT_CONFIG)?,
        None => Config::default(),
    };

    if let Some(input) = &cli.input {
        config.dataset.path = input.clone();
    }
    if let (Some(min_support), Some(min_confidence)) = (cli.min_support, cli.min_confidence) {
        config.thresholds = Some(ThresholdsConfig {
            min_support,
            min_confidence,
        });
    }
    if let Some(source) = cli.rule_source {
        config.rules.source = source;
    }
    if cli.no_prune {
        config.mining.prune_candidates = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::info!(
        "Mining {} (rule source: {})",
        config.dataset.path,
        config.rules.source.as_str()
    );

    let table = load_transactions(&config.dataset)?;
    let session = Session::new(table, config.mining.clone(), config.rules.source);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let Some(thresholds) = config.thresholds else {
        let stdin = std::io::stdin();
        let completed = session.run_interactive(&mut stdin.lock(), &mut out)?;
        tracing::info!("Completed {} rounds", completed);
        return Ok(());
    };

    basket::report::write_items(&mut out, &session.table().unique_items())?;
    let summary = session.run_round(thresholds.min_support, thresholds.min_confidence, &mut out)?;

    if let Some(output_dir) = &cli.output_dir {
        let now = Utc::now();
        let date = now.format("%Y-%m-%d").to_string();
        write_rules_jsonl(output_dir, &date, &summary.rules, now.timestamp_millis())?;
        write_itemsets_parquet(output_dir, &date, &summary.levels)?;
    }

    Ok(())
}
