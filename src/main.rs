use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linkdex::catalog::{load_links, Catalog, JsonUsageStore, UsageStore};
use linkdex::index::suffix_array::SuffixIndexConfig;
use linkdex::output;
use linkdex::utils::{get_config_path, AppConfig};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkdex")]
#[command(about = "Terminal-first bookmark dashboard with substring search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog file with links (overrides config)
    #[arg(long, global = true)]
    links: Option<PathBuf>,

    /// Usage store file (overrides config)
    #[arg(long, global = true)]
    usage: Option<PathBuf>,

    /// Config file (defaults to config.json in the app data directory)
    #[arg(long = "config", global = true)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search links by any part of their name or tags
    Search {
        /// Search term (words are joined with spaces; empty lists everything)
        term: Vec<String>,

        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Record that a link was picked for a search term
    Record {
        /// Uri of the picked link
        uri: String,

        /// Term that was searched
        term: String,
    },
    /// List every link in the catalog
    List {
        /// Print links as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show catalog and index statistics
    Stats {
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config_file {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if cli.links.is_some() {
        config.links_file = cli.links;
    }
    if cli.usage.is_some() {
        config.usage_file = cli.usage;
    }

    match cli.command {
        Commands::Search {
            term,
            limit,
            json,
            no_color,
        } => {
            let catalog = open_catalog(&config)?;
            let term = term.join(" ");
            let limit = limit.unwrap_or(config.result_limit);
            let hits = catalog.search(&term, limit);
            info!("{} hits for {:?}", hits.len(), term);

            if json {
                output::print_json(&hits)?;
            } else if hits.is_empty() {
                println!("No links match '{}'", term);
            } else {
                output::print_hits(&hits, !no_color)?;
            }
        }
        Commands::Record { uri, term } => {
            let links = load_links(&config.effective_links_file()?)?;
            let link = links
                .iter()
                .find(|link| link.uri == uri)
                .with_context(|| format!("No link with uri {}", uri))?;

            let mut usage = JsonUsageStore::open(&config.effective_usage_file()?)?;
            usage.record(link, &term)?;
            println!("Recorded '{}' for {}", term.trim(), link.name);
        }
        Commands::List { json } => {
            let links = load_links(&config.effective_links_file()?)?;
            if json {
                output::print_json(&links)?;
            } else {
                output::print_links(&links, true)?;
            }
        }
        Commands::Stats { json } => {
            let catalog = open_catalog(&config)?;
            let stats = catalog.stats();
            if json {
                output::print_json(&stats)?;
            } else {
                output::print_stats(&stats)?;
            }
        }
        Commands::Config => {
            match &cli.config_file {
                Some(path) => println!("Config file: {}", path.display()),
                None => println!("Config file: {}", get_config_path()?.display()),
            }
            println!("Links file:  {}", config.effective_links_file()?.display());
            println!("Usage file:  {}", config.effective_usage_file()?.display());
            output::print_json(&config)?;
        }
    }

    Ok(())
}

fn open_catalog(config: &AppConfig) -> Result<Catalog> {
    let links = load_links(&config.effective_links_file()?)?;
    let usage = JsonUsageStore::open(&config.effective_usage_file()?)?;
    Ok(Catalog::build(
        links,
        &usage,
        SuffixIndexConfig {
            case_insensitive: config.case_insensitive,
        },
    ))
}
