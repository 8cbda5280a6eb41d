//! `frap-server`: serve the Frap demo site.

use anyhow::{Context, Result};
use clap::Parser;
use frap_core::{LoggingMiddleware, MessageBoard, Orm, Server, Templates};
use frap_server::{init_tracing, site, FrapConfig, Site};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "frap-server", version, about = "Serve the Frap demo site")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "frap.toml")]
    config: PathBuf,

    /// Listen address, overrides `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        FrapConfig::load(&cli.config)
            .with_context(|| format!("loading {}", cli.config.display()))?
    } else {
        FrapConfig::default()
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);
    info!(config = %cli.config.display(), "Starting frap-server v{}", frap_core::VERSION);

    let templates = Arc::new(Templates::new().context("loading templates")?);
    let mut demo = Site::new(MessageBoard::new(), templates);

    let orm = match &config.database.path {
        Some(path) => {
            let orm = Orm::connect(path)
                .await
                .with_context(|| format!("opening database {}", path.display()))?;
            site::prepare_feedback_table(&orm)
                .await
                .context("creating feedback table")?;
            info!(path = %path.display(), "Storing feedback in SQLite");
            demo = demo.with_feedback_store(orm.clone());
            Some(orm)
        }
        None => None,
    };

    let feedback_tasks = demo.clone();
    let app = demo.build().context("building routes")?;
    let mut server = Server::new(app).with_config(config.server_config()?);
    server.add_middleware(LoggingMiddleware);

    server.serve().await.context("server error")?;

    if let Some(orm) = orm {
        feedback_tasks.flush_feedback().await;
        orm.close().await;
    }
    info!("Server stopped");
    Ok(())
}
