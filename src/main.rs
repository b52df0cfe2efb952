//! Fiscrawl main entry point
//!
//! This is the command-line interface for the fiscrawl link scout.

use clap::Parser;
use fiscrawl::config::{load_config_with_hash, Config};
use fiscrawl::crawler::{CrawlExpansion, HttpFetcher};
use fiscrawl::features::{EmbeddingTable, FeatureExtractor, KeywordConfig};
use fiscrawl::model::{load_training_set, RelevanceClassifier};
use fiscrawl::storage::{open_storage, Storage, StoredLink};
use fiscrawl::FiscrawlError;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Fiscrawl: a municipal-finance link scout
///
/// Fiscrawl fetches a page, scores every link on it with a trained
/// relevance classifier, expands the crawl through the high scorers, and
/// stores the merged ranked results for querying.
#[derive(Parser, Debug)]
#[command(name = "fiscrawl")]
#[command(version = "0.1.0")]
#[command(about = "A municipal-finance link scout", long_about = None)]
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

    /// Train a classifier from a JSON training set and save it
    #[arg(long, value_name = "TRAINING_SET", conflicts_with_all = ["scrape", "top", "from_domain", "search", "documents", "avg_scores", "stats"])]
    train: Option<PathBuf>,

    /// Scrape and rank links starting from a seed URL
    #[arg(long, value_name = "URL", conflicts_with_all = ["top", "from_domain", "search", "documents", "avg_scores", "stats"])]
    scrape: Option<String>,

    /// Show the N highest-scoring stored links and exit
    #[arg(long, value_name = "N", conflicts_with_all = ["from_domain", "search", "documents", "avg_scores", "stats"])]
    top: Option<u32>,

    /// Restrict --top to links scraped from one domain
    #[arg(long, requires = "top")]
    domain: Option<String>,

    /// Show every stored link scraped from one domain and exit
    #[arg(long, value_name = "DOMAIN", conflicts_with_all = ["search", "documents", "avg_scores", "stats"])]
    from_domain: Option<String>,

    /// Show stored links whose anchor text contains a keyword and exit
    #[arg(long, value_name = "KEYWORD", conflicts_with_all = ["documents", "avg_scores", "stats"])]
    search: Option<String>,

    /// Show stored links pointing at document files and exit
    #[arg(long, conflicts_with_all = ["avg_scores", "stats"])]
    documents: bool,

    /// Show the mean score per domain and exit
    #[arg(long, conflicts_with = "stats")]
    avg_scores: bool,

    /// Show database statistics and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(training_set) = &cli.train {
        handle_train(&config, training_set)?;
    } else if let Some(seed) = &cli.scrape {
        handle_scrape(&config, seed).await?;
    } else if let Some(limit) = cli.top {
        handle_top(&config, limit, cli.domain.as_deref())?;
    } else if let Some(domain) = &cli.from_domain {
        handle_from_domain(&config, domain)?;
    } else if let Some(keyword) = &cli.search {
        handle_search(&config, keyword)?;
    } else if cli.documents {
        handle_documents(&config)?;
    } else if cli.avg_scores {
        handle_avg_scores(&config)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        eprintln!("No mode selected; pass --train, --scrape, or a query flag (see --help)");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fiscrawl=info,warn"),
            1 => EnvFilter::new("fiscrawl=debug,info"),
            2 => EnvFilter::new("fiscrawl=trace,debug"),
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

/// Builds a classifier with the configured keywords and embedding table,
/// without loading model weights
fn build_classifier(config: &Config) -> Result<RelevanceClassifier, FiscrawlError> {
    let embeddings = match &config.model.embeddings_path {
        Some(path) => {
            tracing::info!("Loading embedding table from: {}", path);
            EmbeddingTable::load(Path::new(path))?
        }
        None => EmbeddingTable::empty(),
    };

    let keywords = KeywordConfig::from_config(&config.keywords);
    Ok(RelevanceClassifier::new(FeatureExtractor::new(
        keywords, embeddings,
    )))
}

/// Handles --train: fits a classifier and saves it to the configured path
fn handle_train(config: &Config, training_set: &Path) -> anyhow::Result<()> {
    println!("Training set: {}", training_set.display());

    let examples = load_training_set(training_set)?;
    println!("Loaded {} labeled examples", examples.len());

    let mut classifier = build_classifier(config)?;
    let report = classifier.train(&examples)?;

    println!(
        "Trained on {} examples ({} held out)",
        report.train_examples, report.test_examples
    );
    match report.test_accuracy {
        Some(accuracy) => println!("Held-out accuracy: {:.1}%", accuracy * 100.0),
        None => println!("Held-out accuracy: n/a (no test split)"),
    }

    classifier.persist_to(Path::new(&config.model.model_path))?;
    println!("✓ Model saved to: {}", config.model.model_path);

    Ok(())
}

/// Handles --scrape: runs the two-pass expansion and stores the results
async fn handle_scrape(config: &Config, seed: &str) -> anyhow::Result<()> {
    let mut classifier = build_classifier(config)?;
    classifier.restore_from(Path::new(&config.model.model_path))?;
    tracing::info!("Model restored from: {}", config.model.model_path);

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let expansion = CrawlExpansion::new(fetcher, classifier, &config.crawler);

    tracing::info!("Scraping seed URL: {}", seed);
    let results = match expansion.crawl(seed).await {
        Ok(results) => results,
        Err(FiscrawlError::NoLinksFound { url }) => {
            tracing::warn!("No links found at {}", url);
            println!("No links found at {}", url);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut storage = open_storage(Path::new(&config.output.database_path))?;
    let written = storage.append_results(&results)?;

    println!("✓ Stored {} ranked links", written);
    for link in results.iter().take(10) {
        println!("  {:.4}  {}  ({})", link.score, link.url, link.anchor_text);
    }
    if results.len() > 10 {
        println!("  ... and {} more", results.len() - 10);
    }

    Ok(())
}

fn print_links(links: &[StoredLink]) {
    if links.is_empty() {
        println!("No matching links");
        return;
    }
    for link in links {
        println!("  {:.4}  {}  ({})", link.score, link.url, link.anchor_text);
    }
}

/// Handles --top: shows the highest-scoring stored links
fn handle_top(
    config: &Config,
    limit: u32,
    domain: Option<&str>,
) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let links = storage.top_links(limit, domain)?;

    match domain {
        Some(domain) => println!("Top {} links from {}:", limit, domain),
        None => println!("Top {} links:", limit),
    }
    print_links(&links);
    Ok(())
}

/// Handles --from-domain: every stored link scraped from one domain
fn handle_from_domain(config: &Config, domain: &str) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let links = storage.links_from_domain(domain)?;

    println!("Links scraped from {}:", domain);
    print_links(&links);
    Ok(())
}

/// Handles --search: anchor-text keyword search
fn handle_search(config: &Config, keyword: &str) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let links = storage.search_by_keyword(keyword)?;

    println!("Links matching \"{}\":", keyword);
    print_links(&links);
    Ok(())
}

/// Handles --documents: stored links that point at document files
fn handle_documents(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let links = storage.document_links()?;

    println!("Document links:");
    print_links(&links);
    Ok(())
}

/// Handles --avg-scores: mean score per domain
fn handle_avg_scores(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;
    let scores = storage.avg_score_per_domain()?;

    println!("Average score per domain:");
    if scores.is_empty() {
        println!("No stored links");
    }
    for entry in &scores {
        println!("  {:.4}  {}", entry.avg_score, entry.domain);
    }
    Ok(())
}

/// Handles --stats: database statistics
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    let storage = open_storage(Path::new(&config.output.database_path))?;

    println!("Database: {}\n", config.output.database_path);
    println!("Total links: {}", storage.count_links()?);
    println!("Document links: {}", storage.document_links()?.len());
    println!(
        "Links above {:.2}: {}",
        config.crawler.high_score_threshold,
        storage
            .links_above_score(config.crawler.high_score_threshold)?
            .len()
    );
    println!("Domains: {}", storage.avg_score_per_domain()?.len());

    Ok(())
}
