//! grimoire - D&D reference API server

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use grimoire::{Config, Server};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "grimoire")]
#[command(about = "D&D 5e reference data and combat calculator server")]
struct Args {
    /// TOML config file (default: grimoire.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides the config
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Directory with the catalog JSON files, overrides the config
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    // Initialize tracing
    let (plain, json) = if config.log_json {
        (None, Some(tracing_subscriber::fmt::layer().json()))
    } else {
        (Some(tracing_subscriber::fmt::layer()), None)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grimoire=info,tower_http=debug".into()),
        )
        .with(plain)
        .with(json)
        .init();

    info!(
        environment = %config.environment,
        debug = config.debug,
        data_dir = %config.data_dir.display(),
        "starting grimoire"
    );

    let server = Arc::new(Server::new(config)?);

    let signal_server = server.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            signal_server.shutdown();
        }
    });

    server.run().await?;

    Ok(())
}
