//! QuickBite CLI - Browse the menu, build carts and warm image caches.
//!
//! # Usage
//!
//! ```bash
//! # List categories and menu items
//! qb categories
//! qb menu --category burgers --query cheese --limit 10
//!
//! # Build a cart from product IDs (optionally with quantities)
//! qb cart burger-1:2 fries
//!
//! # Normalize and prefetch image URLs
//! qb image-url https://cloud.appwrite.io/v1/storage/buckets/b/files/f/view
//! qb prefetch https://example.com/a.png https://example.com/b.png
//!
//! # Sign in, show the profile, sign out
//! qb whoami -e jane@food.app -p hunter22
//!
//! # Seed categories and menu items from a JSON file
//! qb seed data/menu.json -e admin@food.app -p hunter22
//! ```
//!
//! Configuration comes from the environment; see `quickbite_client::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quickbite_client::config::ClientConfig;

mod commands;

#[derive(Parser)]
#[command(name = "qb")]
#[command(author, version, about = "QuickBite CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List menu categories
    Categories,
    /// List menu items
    Menu {
        /// Only items in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Search item names
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum number of items
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Build a cart and print its totals
    Cart {
        /// Product IDs, each optionally suffixed with `:QTY`
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Print an image URL with the project parameter applied
    ImageUrl {
        url: String,

        /// Project ID (defaults to `APPWRITE_PROJECT_ID`)
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Prefetch image URLs and report how many succeeded
    Prefetch {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Sign in, print the profile, then sign out
    Whoami {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create categories and menu items from a JSON seed file
    Seed {
        /// Path to the seed file
        file: String,

        /// Sign in as this user before writing
        #[arg(short, long, requires = "password")]
        email: Option<String>,

        #[arg(short, long, requires = "email")]
        password: Option<String>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
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

    tracing::info!("Sentry initialized");
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

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quickbite_cli=info,quickbite_client=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, &config).await {
        e.report();
        tracing::error!("Command failed: {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> quickbite_client::Result<()> {
    match cli.command {
        Commands::Categories => commands::menu::categories(config).await,
        Commands::Menu {
            category,
            query,
            limit,
        } => commands::menu::list(config, category, query, limit).await,
        Commands::Cart { items } => commands::cart::build(config, &items).await,
        Commands::ImageUrl { url, project } => {
            commands::images::image_url(config, &url, project.as_deref());
            Ok(())
        }
        Commands::Prefetch { urls } => commands::images::prefetch(config, &urls).await,
        Commands::Whoami { email, password } => {
            commands::account::whoami(config, email, password).await
        }
        Commands::Seed {
            file,
            email,
            password,
        } => commands::seed::catalog(config, &file, email, password).await,
    }
}
