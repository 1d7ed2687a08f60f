//! Mini Store command-line front end.
//!
//! See the library docs for usage. Logs go to stderr (filter with
//! `RUST_LOG`); command output goes to stdout.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_store_cli::commands::browse;
use mini_store_cli::{Catalog, CliError, Shell};
use mini_store_core::ProductId;
use mini_store_storefront::StoreConfig;

#[derive(Parser)]
#[command(name = "mini-store")]
#[command(author, version, about = "Browse the store, fill a cart, check out")]
struct Cli {
    /// Read products from a JSON file instead of the API
    #[arg(long, global = true, value_name = "PATH")]
    catalog_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products a page at a time
    Products {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Products per page (defaults to `STORE_PAGE_SIZE`)
        #[arg(short, long)]
        limit: Option<u32>,

        /// List the whole catalog
        #[arg(short, long)]
        all: bool,
    },
    /// Show one product
    Product {
        /// Product id
        id: ProductId,
    },
    /// Filter products by title
    Search {
        /// Case-insensitive text to look for
        query: String,
    },
    /// Interactive session with cart, wishlist and checkout
    Shell,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StoreConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Sentry before the subscriber so the layer has a client
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mini_store_cli=info,mini_store_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if config.sentry_dsn.is_some() {
        tracing::info!("Sentry initialized");
    }

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_server_error() {
                tracing::error!(error = %e, "Command failed");
            } else {
                tracing::debug!(error = %e, "Command rejected");
            }
            let _ = writeln!(std::io::stderr(), "error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &StoreConfig) -> Result<(), CliError> {
    let catalog = Catalog::open(&config.api, cli.catalog_file.as_deref()).await?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Products { page, limit, all } => {
            let limit = limit.unwrap_or(config.page_size);
            browse::products(&catalog, &mut out, page, limit, all).await?;
        }
        Commands::Product { id } => browse::product(&catalog, &mut out, id).await?,
        Commands::Search { query } => browse::search(&catalog, &mut out, &query).await?,
        Commands::Shell => {
            writeln!(out, "Mini Store. Type `help` for commands, `quit` to leave.")?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            Shell::new(catalog, config.page_size)
                .run(input, &mut out)
                .await?;
        }
    }

    out.flush()?;
    Ok(())
}
