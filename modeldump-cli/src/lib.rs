//! Command-line front end: loads a fixture of site records, dumps one entity
//! and renders the result as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use modeldump_dump::{DumpOptions, EntityDumper};
use modeldump_model::{MediaConfig, Store, catalog};
use modeldump_types::PrimaryKey;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(name = "modeldump")]
#[command(about = "Dump a stored entity and its relations as JSON")]
pub struct Args {
    /// Fixture file with the records to load
    #[arg(short, long)]
    pub fixture: PathBuf,

    /// Entity type label, e.g. management.Concern
    #[arg(short, long)]
    pub entity: String,

    /// Primary key of the entity to dump
    #[arg(short, long)]
    pub pk: String,

    /// Relation paths to expand (comma separated)
    #[arg(short, long, value_delimiter = ',')]
    pub relations: Vec<String>,

    /// Paths to leave out (comma separated)
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Expand every relation that is not excluded
    #[arg(short, long)]
    pub all: bool,

    /// Base URL for stored files
    #[arg(long, default_value = "/media/")]
    pub media_url: String,

    /// Prefer cloud copies of stored files
    #[arg(long)]
    pub prefer_cloud_urls: bool,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn dump_options(&self) -> DumpOptions {
        DumpOptions::new()
            .relations(self.relations.iter().map(String::as_str))
            .exclude(self.exclude.iter().map(String::as_str))
            .expand_all(self.all)
            .prefer_cloud_urls(self.prefer_cloud_urls)
    }
}

/// Log filter for the binary. A valid `RUST_LOG` directive wins; otherwise
/// `--verbose` picks `debug` over `info`.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

/// Loads the fixture, dumps the requested entity and returns the JSON text.
pub fn run(args: &Args) -> Result<String> {
    let mut store =
        Store::new(catalog::site_registry()).with_media(MediaConfig::new(args.media_url.clone()));
    let loaded = store
        .load_file(&args.fixture)
        .with_context(|| format!("Failed to load fixture {}", args.fixture.display()))?;
    info!("Loaded {} records from {}", loaded, args.fixture.display());

    let pk = PrimaryKey::parse(&args.pk);
    let Some(entity) = store.get(&args.entity, &pk) else {
        bail!("No {} with primary key {}", args.entity, pk);
    };

    let dumper = EntityDumper::new(args.dump_options());
    let report = dumper
        .dump_report(&entity)
        .with_context(|| format!("Failed to dump {}#{}", args.entity, pk))?;
    for diagnostic in &report.diagnostics {
        warn!("{}", diagnostic);
    }

    let text = if args.pretty {
        serde_json::to_string_pretty(&report.payload)
    } else {
        serde_json::to_string(&report.payload)
    }
    .context("Failed to render dump")?;
    Ok(text)
}
