// connectio-cli/src/main.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use connectio_common::models::{Provider, SessionCookie};
use connectio_core::catalog::ProviderCatalog;
use connectio_core::crypto::Encryptor;
use connectio_core::providers::{
    GithubProfileScraper, GithubProvider, SwiggyProvider, SyncParams, ZomatoProvider,
};
use connectio_core::repositories::{
    SessionCookieRepository, SqliteConnectedAppsRepository, SqliteSessionCookieRepository,
    SqliteSnapshotRepository,
};
use connectio_core::services::SyncService;
use connectio_core::{Database, DefaultHttpClient};

#[derive(Parser, Debug)]
#[command(name = "connectio")]
#[command(
    author,
    version,
    about = "Connect.IO - link third-party accounts and cache their data locally"
)]
struct Args {
    /// Path to the local store.
    #[arg(long, env = "CONNECTIO_DB", default_value = "connectio.db")]
    db: PathBuf,

    /// Optional provider catalog override (JSON, same shape as the built-in).
    #[arg(long, env = "CONNECTIO_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the provider catalog
    List,
    /// Show connection status for each available provider
    Status,
    /// Fetch and store a fresh snapshot for a provider
    Sync {
        provider: String,
        /// GitHub username (required for github)
        #[arg(long)]
        username: Option<String>,
        /// Use the legacy HTML scrape path for GitHub
        #[arg(long, default_value_t = false)]
        scrape: bool,
    },
    /// Print the stored snapshot for a provider
    Show {
        provider: String,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Delete the stored snapshot and disconnect the provider
    Clear { provider: String },
    /// Show the remaining GitHub API quota
    RateLimit,
    /// Manage stored session cookies
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Import cookies from a JSON file: [{"name": "...", "value": "..."}]
    Import { provider: String, file: PathBuf },
    /// Remove stored cookies for a provider
    Clear { provider: String },
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("connectio=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub).expect("Failed to set global subscriber");
}

fn parse_provider(raw: &str) -> Result<Provider> {
    raw.parse::<Provider>().map_err(|e| anyhow!(e))
}

/// Master key resolution: `CONNECTIO_MASTER_KEY`, else a key file next to
/// the database, generated on first use.
fn load_encryptor(db_path: &Path) -> Result<Encryptor> {
    if let Ok(encoded) = std::env::var("CONNECTIO_MASTER_KEY") {
        return Ok(Encryptor::from_base64_key(&encoded)?);
    }

    let key_path = db_path.with_extension("key");
    if key_path.exists() {
        let encoded = fs::read_to_string(&key_path)
            .with_context(|| format!("reading master key {}", key_path.display()))?;
        return Ok(Encryptor::from_base64_key(&encoded)?);
    }

    let encoded = Encryptor::generate_key()?;
    fs::write(&key_path, &encoded)
        .with_context(|| format!("writing master key {}", key_path.display()))?;
    info!("generated new master key at {}", key_path.display());
    Ok(Encryptor::from_base64_key(&encoded)?)
}

fn load_catalog(path: Option<&Path>) -> Result<ProviderCatalog> {
    match path {
        Some(p) => Ok(ProviderCatalog::load_from_path(p)?),
        None => Ok(ProviderCatalog::load_default()?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let db = Database::open(&args.db).await?;
    db.init_schema().await?;

    let encryptor = load_encryptor(&args.db)?;
    let catalog = load_catalog(args.catalog.as_deref())?;

    let snapshots = Arc::new(SqliteSnapshotRepository::new(db.pool().clone()));
    let connected = Arc::new(SqliteConnectedAppsRepository::new(db.pool().clone()));
    let sessions = Arc::new(SqliteSessionCookieRepository::new(
        db.pool().clone(),
        encryptor,
    ));

    let http = Arc::new(DefaultHttpClient::new()?);

    let mut service = SyncService::new(snapshots, connected, catalog);
    service.register(Arc::new(ZomatoProvider::new(http.clone(), sessions.clone())));
    service.register(Arc::new(SwiggyProvider::new(http.clone(), sessions.clone())));

    match args.command {
        Command::List => {
            println!("Available:");
            for app in service.catalog().available() {
                println!("  {:<10} {} - {}", app.id, app.name, app.description);
            }
            let coming: Vec<_> = service.catalog().coming_soon().collect();
            if !coming.is_empty() {
                println!("Coming soon:");
                for app in coming {
                    println!("  {:<10} {}", app.id, app.name);
                }
            }
        }

        Command::Status => {
            for provider in Provider::all() {
                let status = service.status(provider).await?;
                let snapshot = service.snapshot(provider).await?;
                let fetched = snapshot
                    .map(|s| format!("snapshot from {}", s.fetched_at.to_rfc3339()))
                    .unwrap_or_else(|| "no snapshot".to_string());
                println!("  {:<10} {:?} ({})", provider.to_string(), status, fetched);
            }
        }

        Command::Sync {
            provider,
            username,
            scrape,
        } => {
            let provider = parse_provider(&provider)?;
            if scrape && provider == Provider::Github {
                service.register(Arc::new(GithubProfileScraper::new(http.clone())));
            } else if provider == Provider::Github {
                service.register(Arc::new(GithubProvider::new(http.clone())));
            }

            let snapshot = service.sync(provider, SyncParams { username }).await?;
            println!(
                "Synced {}: snapshot stored (fetched at {})",
                provider,
                snapshot.fetched_at.to_rfc3339()
            );
        }

        Command::Show { provider, pretty } => {
            let provider = parse_provider(&provider)?;
            match service.snapshot(provider).await? {
                Some(snapshot) => {
                    let text = if pretty {
                        serde_json::to_string_pretty(&snapshot.payload)?
                    } else {
                        serde_json::to_string(&snapshot.payload)?
                    };
                    println!("{text}");
                }
                None => println!("No snapshot stored for {provider}"),
            }
        }

        Command::Clear { provider } => {
            let provider = parse_provider(&provider)?;
            service.clear(provider).await?;
            println!("Cleared {provider}");
        }

        Command::RateLimit => {
            let github = GithubProvider::new(http.clone());
            let rate = github.rate_limit().await?;
            println!(
                "GitHub API: {}/{} remaining (resets at epoch {})",
                rate.remaining, rate.limit, rate.reset
            );
        }

        Command::Session { command } => match command {
            SessionCommand::Import { provider, file } => {
                let provider = parse_provider(&provider)?;
                let text = fs::read_to_string(&file)
                    .with_context(|| format!("reading cookie file {}", file.display()))?;
                let cookies: Vec<SessionCookie> = serde_json::from_str(&text)
                    .with_context(|| format!("parsing cookie file {}", file.display()))?;
                sessions.store_cookies(provider, &cookies).await?;
                println!("Imported {} cookies for {provider}", cookies.len());
            }
            SessionCommand::Clear { provider } => {
                let provider = parse_provider(&provider)?;
                sessions.clear(provider).await?;
                println!("Cleared session cookies for {provider}");
            }
        },
    }

    Ok(())
}
