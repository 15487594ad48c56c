//! Blog Admin
//!
//! Launches the user and blog administration pages.
//!
//! ## Routes
//!
//! - `/admin/users`: list, add, show, edit and delete users
//! - `/admin/blogs`: list, add, show, edit and delete blogs

use admin::Config;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Blog Admin server
///
/// Every flag falls back to its environment variable, then to the built-in
/// default.
#[derive(Debug, Parser)]
#[command(name = "blogadmin", version = "0.1.0")]
#[command(about = "Administration pages for users and their blogs")]
struct Cli {
    /// SQLite connection string, e.g. `sqlite://blogadmin.db`
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDRESS")]
    bind_address: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS")]
    max_connections: Option<u32>,
}

impl Cli {
    fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            database_url: self.database_url.unwrap_or(defaults.database_url),
            bind_address: self.bind_address.unwrap_or(defaults.bind_address),
            max_connections: self.max_connections.unwrap_or(defaults.max_connections),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();

    info!(
        database = config.database_url.as_str(),
        bind_address = config.bind_address.as_str(),
        "Starting Blog Admin service"
    );

    let db = admin::Database::new(&config.database_url, config.max_connections).await?;
    let app = admin::routes().with_state(admin::AppState::new(db));

    info!("Listening on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(signal())
        .await?;

    Ok(())
}

async fn signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, terminating...");
}
