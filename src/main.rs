//! Docsweep main entry point
//!
//! This is the command-line interface for the Docsweep documentation exporter.

use anyhow::Context;
use clap::Parser;
use docsweep::config::{load_config_with_hash, validate, Config, FetchConfig, JobConfig};
use docsweep::output::print_statistics;
use docsweep::{MarkdownRenderer, Orchestrator, SweepError};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Docsweep: export a documentation site to Markdown
///
/// Docsweep crawls a documentation site breadth-first from one or more seed
/// URLs, converts every in-scope page (or `#anchor` section) to Markdown, and
/// writes an export tree with `llms.txt` and `llms_index.md` indexes.
#[derive(Parser, Debug)]
#[command(name = "docsweep")]
#[command(version)]
#[command(about = "Export a documentation site to Markdown", long_about = None)]
struct Cli {
    /// Path to a TOML job file
    #[arg(
        value_name = "JOB",
        conflicts_with_all = [
            "seeds", "path_prefix", "max_pages", "output", "any_domain",
            "no_robots", "no_fragments", "no_zip",
        ]
    )]
    job: Option<PathBuf>,

    /// Seed URL (repeatable, or comma separated)
    #[arg(long = "seed", value_name = "URL", value_delimiter = ',')]
    seeds: Vec<String>,

    /// Only export pages whose path starts with this prefix (e.g. /docs)
    #[arg(long, value_name = "PREFIX")]
    path_prefix: Option<String>,

    /// Maximum number of pages to export
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Output directory
    #[arg(long, short, value_name = "DIR")]
    output: Option<String>,

    /// Follow links to hosts other than the seed hosts
    #[arg(long)]
    any_domain: bool,

    /// Ignore robots.txt
    #[arg(long)]
    no_robots: bool,

    /// Export `#anchor` seeds as the full page instead of the section
    #[arg(long)]
    no_fragments: bool,

    /// Skip creating the ZIP archive
    #[arg(long)]
    no_zip: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the job and print it without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_export(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docsweep=info,warn"),
            1 => EnvFilter::new("docsweep=debug,info"),
            2 => EnvFilter::new("docsweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the validated job from the job file or from the flags
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.job {
        tracing::info!("Loading job from: {}", path.display());
        let (config, hash) = load_config_with_hash(path)
            .with_context(|| format!("failed to load job file {}", path.display()))?;
        tracing::info!("Job loaded successfully (hash: {})", hash);
        return Ok(config);
    }

    let mut job = JobConfig::with_seeds(cli.seeds.clone());
    job.same_domain = !cli.any_domain;
    job.path_prefix = cli.path_prefix.clone();
    if let Some(max_pages) = cli.max_pages {
        job.max_pages = max_pages;
    }
    if let Some(output) = &cli.output {
        job.output_dir = output.clone();
    }
    job.make_zip = !cli.no_zip;
    job.obey_robots = !cli.no_robots;
    job.include_fragments = !cli.no_fragments;

    let config = Config {
        job,
        fetch: FetchConfig::default(),
    };
    validate(&config).context("invalid job (pass a job file or at least one --seed)")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be exported
fn handle_dry_run(config: &Config) {
    let job = &config.job;
    println!("=== Docsweep Dry Run ===\n");

    println!("Seeds ({}):", job.seeds.len());
    for seed in &job.seeds {
        println!("  - {}", seed);
    }

    println!("\nScope:");
    println!("  Same domain: {}", job.same_domain);
    println!(
        "  Path prefix: {}",
        job.path_prefix.as_deref().unwrap_or("(none)")
    );
    println!("  Obey robots.txt: {}", job.obey_robots);
    println!("  Max pages: {}", job.max_pages);

    println!("\nOutput:");
    println!("  Directory: {}", job.output_dir);
    println!("  Fragment sections: {}", job.include_fragments);
    println!("  ZIP archive: {}", job.make_zip);

    println!("\nFetch:");
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!("  robots.txt timeout: {}s", config.fetch.robots_timeout_secs);

    println!("\n✓ Job is valid");
}

/// Handles the main export operation
async fn handle_export(config: Config) -> anyhow::Result<()> {
    let orchestrator = match Orchestrator::new(config, Arc::new(MarkdownRenderer::new())) {
        Ok(orchestrator) => orchestrator,
        Err(e @ SweepError::RendererUnavailable { .. }) => {
            tracing::error!("{}", e);
            return Err(e).context("cannot start export");
        }
        Err(e) => return Err(e.into()),
    };

    let stop = orchestrator.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            stop.store(true, Ordering::SeqCst);
        }
    });

    let report = match orchestrator.run().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            return Err(e.into());
        }
    };

    print_statistics(&report);
    Ok(())
}
