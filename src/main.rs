//! Webpage Analyzer main entry point
//!
//! This is the command-line interface for analyzing a single web page.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use webpage_analyzer::config::{load_config, Config};
use webpage_analyzer::output::{format_json, print_report};
use webpage_analyzer::{
    validate_target_url, AnalysisResult, CircuitBreakerSettings, CircuitBreakerTransport,
    PageAnalyzer, ReqwestTransport, Transport,
};

/// Webpage Analyzer: structure and link health of a single page
///
/// Fetches the page, reports its HTML version, title, heading counts and
/// whether it carries a login form, and probes every link for reachability.
#[derive(Parser, Debug)]
#[command(name = "webpage-analyzer")]
#[command(version = "1.0.0")]
#[command(about = "Analyze the structure and links of a web page", long_about = None)]
struct Cli {
    /// URL of the page to analyze
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Stop sending requests while most recent ones fail at the network level
    #[arg(long)]
    circuit_breaker: bool,

    /// Validate the URL and configuration without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if cli.dry_run {
        return handle_dry_run(&cli.url, &config);
    }

    handle_analysis(&cli.url, &config, cli.json, cli.circuit_breaker).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("webpage_analyzer=info,warn"),
            1 => EnvFilter::new("webpage_analyzer=debug,info"),
            2 => EnvFilter::new("webpage_analyzer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: validates inputs and shows the effective limits
fn handle_dry_run(url: &str, config: &Config) -> Result<()> {
    let target = validate_target_url(url, config.analysis.max_url_length)?;
    let analysis = &config.analysis;

    println!("=== Webpage Analyzer Dry Run ===\n");
    println!("Target: {}", target);

    println!("\nLimits:");
    println!("  Request timeout: {}s", analysis.request_timeout_secs);
    println!("  Link check timeout: {}s", analysis.link_check_timeout_secs);
    println!(
        "  Concurrent link checks: {}",
        analysis.max_concurrent_link_checks
    );
    match analysis.max_links_to_check {
        Some(max) => println!("  Links checked per page: {}", max),
        None => println!("  Links checked per page: all"),
    }
    println!("  Max HTML depth: {}", analysis.max_html_depth);
    println!("  Max content size: {} bytes", analysis.max_content_size);

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the main analysis over the production transport
async fn handle_analysis(url: &str, config: &Config, json: bool, circuit_breaker: bool) -> Result<()> {
    let transport =
        ReqwestTransport::new(&config.user_agent).context("failed to build HTTP client")?;

    if circuit_breaker {
        let transport = CircuitBreakerTransport::new(transport, CircuitBreakerSettings::default());
        let analyzer = PageAnalyzer::new(Arc::new(transport), config.analysis.clone());
        run_analysis(&analyzer, url, json).await
    } else {
        let analyzer = PageAnalyzer::new(Arc::new(transport), config.analysis.clone());
        run_analysis(&analyzer, url, json).await
    }
}

/// Runs the analysis, cancelling on Ctrl-C, and prints the result
async fn run_analysis<T: Transport>(analyzer: &PageAnalyzer<T>, url: &str, json: bool) -> Result<()> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with partial results");
            on_interrupt.cancel();
        }
    });

    match analyzer.analyze_url(url, &cancel).await {
        Ok(result) => {
            emit(&result, json)?;
            Ok(())
        }
        Err(failure) => {
            tracing::error!("Analysis failed during {}: {}", failure.stage, failure);
            if let Some(partial) = &failure.partial {
                emit(partial, json)?;
            }
            Err(failure.into())
        }
    }
}

fn emit(result: &AnalysisResult, json: bool) -> Result<()> {
    if json {
        println!("{}", format_json(result)?);
    } else {
        print_report(result);
    }
    Ok(())
}
