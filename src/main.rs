use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use library_search::config::{find_config_file, load_config, write_config_file, SearchConfig};
use library_search::utils::{render_json, render_plain, render_table};
use library_search::{LibraryResult, LibrarySearch};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Library Search - find out which of your libraries has a book and how soon you can borrow it
#[derive(Parser, Debug)]
#[command(name = "libquery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search the digital catalogs of your libraries", long_about = None)]
struct Cli {
    /// Query string to search
    #[arg(long, short = 'q', required_unless_present = "write_config")]
    query: Option<String>,

    /// Max results to return from each library
    #[arg(long, short = 'm', default_value_t = 10)]
    max: usize,

    /// Library to search (repeatable; defaults to the configured libraries)
    #[arg(long = "library", short = 'l')]
    libraries: Vec<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Overall deadline for the whole search in seconds
    #[arg(long)]
    deadline: Option<u64>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress everything but errors in the log
    #[arg(long)]
    quiet: bool,

    /// Write the resolved configuration as TOML to this path and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Table if stdout is a terminal, JSON otherwise
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("library_search={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolve the configuration from file, environment, and flags
fn resolve_config(cli: &Cli) -> Result<SearchConfig> {
    let path = cli.config.clone().or_else(find_config_file);
    if let Some(path) = &path {
        tracing::info!("Using config file: {}", path.display());
    }
    let mut config = load_config(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("loading config {}", path.display()),
        None => "loading config from environment".to_string(),
    })?;

    if !cli.libraries.is_empty() {
        config = config.libraries(cli.libraries.iter().cloned());
    }
    if let Some(secs) = cli.timeout {
        config = config.request_timeout_secs(secs);
    }
    if cli.deadline.is_some() {
        config = config.search_deadline_secs(cli.deadline);
    }

    Ok(config)
}

fn print_results(results: &[LibraryResult], format: OutputFormat) -> Result<()> {
    let format = match format {
        OutputFormat::Auto if std::io::stdout().is_terminal() => OutputFormat::Table,
        OutputFormat::Auto => OutputFormat::Json,
        other => other,
    };

    match format {
        OutputFormat::Json => println!("{}", render_json(results)?),
        OutputFormat::Plain => print!("{}", render_plain(results)),
        OutputFormat::Table | OutputFormat::Auto => {
            if results.is_empty() {
                println!("No results found");
            } else {
                println!("{}", render_table(results));
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = resolve_config(&cli)?;

    if let Some(path) = &cli.write_config {
        write_config_file(path, &config)
            .with_context(|| format!("writing config {}", path.display()))?;
        eprintln!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let query = cli.query.as_deref().unwrap_or_default();
    if query.trim().is_empty() {
        bail!("Query string cannot be empty.");
    }

    let search = LibrarySearch::new(config).context("invalid search configuration")?;

    let results = search
        .search(query, cli.max)
        .await
        .context("Error searching for results")?;

    print_results(&results, cli.output)
}
