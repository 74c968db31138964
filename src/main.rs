use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use folio::config::{DEFAULT_MAX_UPLOAD_BYTES, ServerConfig};
use folio::server::{AppState, create_router};
use folio::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "A personal portfolio API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and database schema
    Init {
        /// Data directory for the database and uploaded files
        #[arg(long, env = "FOLIO_DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,
    },

    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, env = "FOLIO_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, env = "PORT", default_value = "5000")]
        port: u16,

        /// Data directory for the database and uploaded files
        #[arg(long, env = "FOLIO_DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,

        /// Largest accepted résumé upload, in megabytes
        #[arg(long, env = "FOLIO_MAX_UPLOAD_MB")]
        max_upload_mb: Option<usize>,
    },
}

fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
    fs::create_dir_all(&config.data_dir)?;
    fs::create_dir_all(config.uploads_dir())?;

    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("folio=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => {
            let config = ServerConfig {
                data_dir,
                ..ServerConfig::default()
            };
            open_store(&config)?;
            println!("Database ready at {}", config.db_path().display());
        }
        Commands::Serve {
            host,
            port,
            data_dir,
            max_upload_mb,
        } => {
            let config = ServerConfig {
                host,
                port,
                data_dir,
                max_upload_bytes: max_upload_mb
                    .map(|mb| mb * 1024 * 1024)
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            };

            let store = open_store(&config)?;
            info!("Database at {}", config.db_path().display());

            let state = Arc::new(
                AppState::new(Arc::new(store), config.uploads_dir())
                    .with_max_upload_bytes(config.max_upload_bytes),
            );

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);
            info!("API available at http://{}/api", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
