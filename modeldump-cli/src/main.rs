//! modeldump
//!
//! Dumps one entity from a fixture file as JSON:
//!   modeldump --fixture site.json --entity management.Concern --pk 101 --relations user
//!
//! JSON goes to stdout, logs to stderr. `RUST_LOG` takes precedence over
//! `--verbose`.

use anyhow::Result;
use clap::Parser;
use modeldump_cli::{Args, log_filter, run};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse();
    let rust_log = std::env::var("RUST_LOG").ok();
    FmtSubscriber::builder()
        .with_env_filter(log_filter(args.verbose, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let output = run(&args)?;
    println!("{output}");
    Ok(())
}
