//! Portfolio analysis runner - loads a property export, enriches it and prints a JSON report

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use property_portfolio::analysis::{
    analyze_portfolio, compare_portfolio_items, market_analysis, optimize_portfolio,
    portfolio_statistics,
};
use property_portfolio::records::enrich::{enrich_all, DatazoneLookup};
use property_portfolio::records::parse::{
    filter_by_owner, parse_properties_csv, parse_properties_json,
};
use property_portfolio::records::PropertyRecord;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env before reading RUST_LOG or any other setting
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting portfolio analysis");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Command and its arguments from the command line
    let args: Vec<String> = env::args().skip(1).collect();
    let (command, rest) = match args.split_first() {
        Some((command, rest)) => (command.as_str(), rest),
        None => ("analyze", &[][..]),
    };

    let records = load_portfolio(&config)?;
    info!("Loaded {} properties", records.len());

    let result = match command {
        "analyze" => serde_json::to_value(analyze_portfolio(&records))?,
        "compare" => {
            let selected = select_properties(&records, rest)?;
            serde_json::to_value(compare_portfolio_items(&selected)?)?
        }
        "optimize" => serde_json::to_value(optimize_portfolio(&records))?,
        "statistics" => serde_json::to_value(portfolio_statistics(&records))?,
        "market" => {
            let filter = rest.first().map(String::as_str);
            serde_json::to_value(market_analysis(&records, filter))?
        }
        other => {
            return Err(anyhow::anyhow!(
                "Unknown command: {} (expected analyze, compare, optimize, statistics or market)",
                other
            ));
        }
    };

    let report = Report {
        command: command.to_string(),
        generated_at: Utc::now(),
        result,
    };

    let output = if config.pretty_output {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    info!("Portfolio analysis complete");

    Ok(())
}

/// Read, scope and enrich the property snapshot
fn load_portfolio(config: &Config) -> Result<Vec<PropertyRecord>> {
    // Step 1: Parse the export
    let records = read_properties(&config.properties_path)?;

    // Step 2: Restrict to one owner when requested
    let records = match config.user_id {
        Some(user_id) => {
            let owned = filter_by_owner(&records, user_id);
            info!("Selected {} properties for user {}", owned.len(), user_id);
            owned
        }
        None => records,
    };

    // Step 3: Datazone enrichment
    match &config.datazone_path {
        Some(path) => {
            let lookup = DatazoneLookup::from_csv_path(path)?;
            Ok(enrich_all(records, &lookup))
        }
        None => Ok(records),
    }
}

fn read_properties(path: &Path) -> Result<Vec<PropertyRecord>> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read properties from {:?}", path))?;
        parse_properties_json(&bytes)
    } else {
        parse_properties_csv(path)
    }
}

/// Resolve property ids given on the command line
fn select_properties(records: &[PropertyRecord], ids: &[String]) -> Result<Vec<PropertyRecord>> {
    let mut selected = Vec::new();

    for raw in ids {
        let id: i64 = raw
            .parse()
            .with_context(|| format!("Invalid property id: {}", raw))?;

        match records.iter().find(|record| record.id == id) {
            Some(record) => selected.push(record.clone()),
            None => warn!("Property {} not found in portfolio", id),
        }
    }

    Ok(selected)
}

#[derive(Debug, Serialize)]
struct Report {
    command: String,
    generated_at: DateTime<Utc>,
    result: serde_json::Value,
}

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
struct Config {
    properties_path: PathBuf,
    datazone_path: Option<PathBuf>,
    user_id: Option<i64>,
    pretty_output: bool,
}

impl Config {
    fn from_env() -> Result<Self> {
        let user_id = match env::var("USER_ID") {
            Ok(raw) => Some(
                raw.trim()
                    .parse()
                    .with_context(|| format!("USER_ID must be an integer, got {}", raw))?,
            ),
            Err(_) => None,
        };

        Ok(Config {
            properties_path: env::var("PROPERTIES_PATH")
                .unwrap_or_else(|_| "data/properties.csv".to_string())
                .into(),

            datazone_path: env::var("DATAZONE_PATH").ok().map(PathBuf::from),

            user_id,

            pretty_output: env::var("PRETTY_OUTPUT")
                .ok()
                .map(|s| !matches!(s.trim().to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        })
    }
}
