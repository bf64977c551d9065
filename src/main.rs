//! # Glossary Search CLI (`gls`)
//!
//! The `gls` binary lists, searches, and shows glossary terms from the
//! configured headless CMS, refines an already-loaded batch offline, and
//! starts the JSON server.
//!
//! ## Usage
//!
//! ```bash
//! gls --config ./config/gls.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `gls search [QUERY]` | One listing page, optionally filtered |
//! | `gls get <slug>` | A term with related terms |
//! | `gls categories` | All categories |
//! | `gls refine --input <file>` | Filter a saved batch without the network |
//! | `gls serve` | Start the JSON HTTP server |
//!
//! Set `RUST_LOG=debug` to see store requests and retries.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use glossary_core::criteria::FilterCriteria;
use glossary_core::models::Difficulty;
use glossary_search::{categories, config, get, refine, search, server};

/// Glossary Search CLI: filtered listings and term lookup for a headless-CMS
/// IT glossary.
#[derive(Parser)]
#[command(
    name = "gls",
    about = "Glossary Search: filtered listings and term lookup for a headless-CMS IT glossary",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/gls.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Filter flags shared by `search` and `refine`.
#[derive(clap::Args)]
struct FilterArgs {
    /// Category identifier.
    #[arg(long)]
    category: Option<String>,

    /// Difficulty label: `beginner`, `intermediate`, or `advanced`.
    #[arg(long)]
    difficulty: Option<Difficulty>,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Show one listing page from the content store.
    ///
    /// Matches the free-text query against each term's normalized search
    /// title. Twelve terms per page.
    Search {
        /// Free-text query.
        query: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page number (1-based).
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show a term by slug, with related terms from its category.
    Get {
        /// Term slug.
        slug: String,
    },

    /// List all categories.
    Categories,

    /// Refine an already-loaded batch of terms without contacting the store.
    ///
    /// Only terms in the batch can match.
    Refine {
        /// JSON file: an array of terms or a CMS list response.
        #[arg(long)]
        input: PathBuf,

        /// Free-text query.
        #[arg(long)]
        q: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Start the JSON HTTP server on `[server].bind`.
    Serve,
}

fn build_criteria(query: Option<String>, filters: FilterArgs, page: u32) -> FilterCriteria {
    let mut criteria = FilterCriteria::new().with_page(page);
    if let Some(category) = filters.category {
        criteria = criteria.with_category(category);
    }
    if let Some(difficulty) = filters.difficulty {
        criteria = criteria.with_difficulty(difficulty);
    }
    if let Some(query) = query {
        criteria = criteria.with_query(query);
    }
    criteria
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Refining works on a local file and needs no config
    if let Commands::Refine { input, q, filters } = cli.command {
        let criteria = build_criteria(q, filters, 1);
        return refine::run_refine(&input, &criteria);
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Search {
            query,
            filters,
            page,
        } => {
            search::run_search(&cfg, build_criteria(query, filters, page)).await?;
        }
        Commands::Get { slug } => {
            get::run_get(&cfg, &slug).await?;
        }
        Commands::Categories => {
            categories::list_categories(&cfg).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Refine { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
