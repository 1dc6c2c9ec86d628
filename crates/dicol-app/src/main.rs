use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dicol_config::{ALPHABET, Config, StoreSource};
use tracing_subscriber::EnvFilter;

pub mod collector;
pub mod persist;


#[derive(Parser, Debug)]
#[command(name = "dicol", about = "Extract and normalize DICOL dictionary entries")]
struct Cli {
    /// JSON config file; environment variables are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Entry store backend: api or local
    #[arg(long, value_parser = parse_source)]
    source: Option<StoreSource>,

    #[arg(long)]
    dictionary_id: Option<String>,

    #[arg(long)]
    api_url: Option<String>,

    /// Directory of the offline store
    #[arg(long)]
    local_dir: Option<PathBuf>,

    /// Output dataset path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Dump every raw entry into this directory
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Only these letters, e.g. "ABÑ"
    #[arg(long)]
    letters: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn parse_source(s: &str) -> Result<StoreSource, String> {
    StoreSource::parse(s).ok_or_else(|| format!("unknown source '{s}', expected api or local"))
}

impl Cli {
    fn base_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load(path),
            None => Ok(Config::new()),
        }
    }

    /// Apply command-line overrides on top of `config`
    fn apply(&self, mut config: Config) -> Config {
        if let Some(source) = self.source {
            config.store.source = source;
        }
        if let Some(id) = &self.dictionary_id {
            config.store.dictionary_id = id.clone();
        }
        if let Some(url) = &self.api_url {
            config.store.api_url = url.clone();
        }
        if let Some(dir) = &self.local_dir {
            config.store.local_dir = dir.clone();
        }
        if let Some(path) = &self.output {
            config.output.path = path.clone();
        }
        if let Some(dir) = &self.dump_dir {
            config.output.dump_dir = Some(dir.clone());
        }
        config
    }

    fn letters(&self) -> Vec<String> {
        match &self.letters {
            Some(letters) => letters
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| c.to_uppercase().collect())
                .collect(),
            None => ALPHABET.iter().map(|l| l.to_string()).collect(),
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = cli.apply(cli.base_config()?);
    let letters = cli.letters();
    let letters: Vec<&str> = letters.iter().map(String::as_str).collect();

    let store = dicol_store::build_store(&config.store);
    tracing::info!(
        dictionary_id = %config.store.dictionary_id,
        "Starting extraction from {}",
        store.metadata().name
    );

    let collection = collector::run(&config, store.as_ref(), &letters)
        .await
        .with_context(|| format!("Failed to save {}", config.output.path.display()))?;

    for (letter, outcome) in &collection.partitions {
        tracing::debug!("{letter}: {outcome}");
    }

    let failed = collection.failed_letters();
    if failed.is_empty() {
        tracing::info!(
            "Extraction complete: {} records from {} entries",
            collection.records.len(),
            collection.entry_count()
        );
    } else {
        tracing::warn!(
            "Extraction complete: {} records, failed letters: {}",
            collection.records.len(),
            failed.join(", ")
        );
    }

    Ok(())
}
