//! Doc-Frontier command-line entry point.

use clap::Parser;
use doc_frontier::browser::BrowserContext;
use doc_frontier::classifier::NoopClassifier;
use doc_frontier::config::load_config_with_hash;
use doc_frontier::output::{build_full_summary, print_statistics, write_markdown_summary};
use doc_frontier::rate_limiter::RateLimiter;
use doc_frontier::runner::{run, RunnerDeps};
use doc_frontier::storage::{Frontier, SqliteStorage};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Doc-Frontier: a document-discovery web crawler core.
///
/// Traverses operator-configured root URLs in search of target documents
/// (PDFs, office documents, and similar), persisting a deduplicated
/// inventory of what it finds while respecting per-domain politeness and
/// bounded concurrency.
#[derive(Parser, Debug)]
#[command(name = "doc-frontier")]
#[command(version = "1.0.0")]
#[command(about = "A document-discovery web crawler core", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start a fresh crawl, discarding any existing database at the
    /// configured path (default behavior resumes: idempotent admission
    /// makes re-running the same configuration safe, §8 property 3).
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with_all = ["stats", "export_summary"])]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export_summary"])]
    stats: bool,

    /// Generate markdown summary from existing data and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    export_summary: bool,
}

/// Process exit codes (§6): 0 all roots reached a terminal status, 1
/// unrecoverable bootstrap failure, 2 at least one root finished FAILED.
const EXIT_OK: i32 = 0;
const EXIT_BOOTSTRAP_FAILURE: i32 = 1;
const EXIT_ROOT_FAILED: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let exit_code = match run_cli(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "bootstrap failure");
            EXIT_BOOTSTRAP_FAILURE
        }
    };

    std::process::exit(exit_code);
}

async fn run_cli(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    tracing::info!("loading configuration from {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)?;
    tracing::info!(hash = %config_hash, categories = config.categories.len(), "configuration loaded");

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(EXIT_OK);
    }

    if cli.fresh {
        let db_path = Path::new(&config.output.database_path);
        for suffix in ["", "-wal", "-shm"] {
            let path = PathBuf::from(format!("{}{}", db_path.display(), suffix));
            if path.exists() {
                tracing::info!(path = %path.display(), "fresh crawl requested, removing existing database file");
                std::fs::remove_file(&path)?;
            }
        }
    }

    let mut storage = SqliteStorage::new(Path::new(&config.output.database_path))?;

    if cli.stats {
        handle_stats(&storage, &config);
        return Ok(EXIT_OK);
    }

    if cli.export_summary {
        handle_export_summary(&storage, &config, &config_hash)?;
        return Ok(EXIT_OK);
    }

    handle_crawl(&config, &config_hash, &mut storage).await
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("doc_frontier=info,warn"),
            1 => EnvFilter::new("doc_frontier=debug,info"),
            2 => EnvFilter::new("doc_frontier=trace,debug"),
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

fn handle_dry_run(config: &doc_frontier::config::Config) {
    println!("=== Doc-Frontier Dry Run ===\n");

    println!("Crawler configuration:");
    println!("  Max concurrent pages: {}", config.crawler.max_concurrent_pages);
    println!(
        "  Domain minimum interval: {}ms",
        config.crawler.domain_min_interval_ms
    );
    println!(
        "  Navigation timeout: {}s",
        config.crawler.navigation_timeout_secs
    );

    println!("\nUser agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Summary: {}", config.output.summary_path);

    println!("\nCategories ({}):", config.categories.len());
    for category in &config.categories {
        println!("  - {} ({} roots)", category.name, category.roots.len());
        for root in &category.roots {
            println!(
                "    * {} (type={}, max-depth={})",
                root.url, root.type_ordinal, root.max_depth
            );
        }
    }

    println!("\n✓ Configuration is valid");
}

fn handle_stats(storage: &SqliteStorage, config: &doc_frontier::config::Config) {
    println!("Database: {}\n", config.output.database_path);

    if config.categories.len() == 1 {
        let stats = storage
            .statistics(Some(&config.categories[0].name))
            .expect("statistics query failed");
        print_statistics(&stats, Some(&config.categories[0].name));
        return;
    }

    for category in &config.categories {
        let stats = storage
            .statistics(Some(&category.name))
            .expect("statistics query failed");
        print_statistics(&stats, Some(&category.name));
        println!();
    }

    let overall = storage.statistics(None).expect("statistics query failed");
    print_statistics(&overall, None);
}

fn handle_export_summary(
    storage: &SqliteStorage,
    config: &doc_frontier::config::Config,
    config_hash: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Exporting Crawl Summary ===\n");
    println!("Database: {}", config.output.database_path);
    println!("Output: {}", config.output.summary_path);

    let summary = build_full_summary(storage, config_hash)?;
    write_markdown_summary(&summary, Path::new(&config.output.summary_path))?;

    println!("\n✓ Summary exported to: {}", config.output.summary_path);
    Ok(())
}

async fn handle_crawl(
    config: &doc_frontier::config::Config,
    config_hash: &str,
    storage: &mut SqliteStorage,
) -> Result<i32, Box<dyn std::error::Error>> {
    let navigation_timeout = Duration::from_secs(config.crawler.navigation_timeout_secs);

    tracing::info!("launching headless browser context");
    let browser = BrowserContext::launch(&config.user_agent, navigation_timeout).await?;

    let classifier = NoopClassifier;
    let rate_limiter = RateLimiter::new(
        config.crawler.max_concurrent_pages,
        Duration::from_millis(config.crawler.domain_min_interval_ms),
    );

    let mut deps = RunnerDeps {
        store: storage,
        page_fetcher: &browser,
        classifier: &classifier,
        rate_limiter: &rate_limiter,
        user_agent: &config.user_agent,
        navigation_timeout,
    };

    let summary = run(config, &mut deps).await;
    drop(deps);

    tracing::info!(
        completed = summary.roots_completed,
        partially_completed = summary.roots_partially_completed,
        failed = summary.roots_failed,
        "crawl finished"
    );

    browser.shutdown().await?;

    let report = build_full_summary(storage, config_hash)?;
    write_markdown_summary(&report, Path::new(&config.output.summary_path))?;
    println!("Summary written to: {}", config.output.summary_path);

    if summary.any_failed() {
        Ok(EXIT_ROOT_FAILED)
    } else {
        Ok(EXIT_OK)
    }
}
