//! grimoire - D&D 5e reference API and combat calculator
//!
//! Serves a read-only catalog of characters, monsters, and items, random
//! character and monster generators, and a dice-driven combat engine.

pub mod api;
pub mod catalog;
pub mod combat;
pub mod generate;
pub mod rules;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use api::{AppState, RollerFactory};
use catalog::Catalog;

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "grimoire.toml";

/// Prefix for environment overrides, e.g. `GRIMOIRE_BIND_ADDR`
pub const ENV_PREFIX: &str = "GRIMOIRE_";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Directory holding characters.json, monsters.json, items.json
    pub data_dir: PathBuf,
    pub environment: String,
    pub debug: bool,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Comma-separated origins; `*` allows any
    pub cors_allowed_origins: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            data_dir: PathBuf::from("data"),
            environment: "dev".to_string(),
            debug: true,
            log_json: false,
            cors_allowed_origins: "http://localhost:5173,http://127.0.0.1:5173".to_string(),
        }
    }
}

impl Config {
    /// Layer defaults, a TOML file, and `GRIMOIRE_*` environment variables
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let layers = Figment::from(Serialized::defaults(Config::default()));
        let layers = match path {
            Some(path) if !path.is_file() => {
                return Err(figment::Error::from(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => layers.merge(Toml::file(path)),
            None => layers.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };
        layers.merge(Env::prefixed(ENV_PREFIX)).extract()
    }

    /// Allowed origins, trimmed, empties dropped
    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    fn cors_layer(&self) -> CorsLayer {
        let origins = self.cors_origins();
        if origins.iter().any(|origin| origin == "*") {
            warn!("CORS configured to allow any origin");
            return CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
        }

        info!(?origins, "CORS configured");
        let origins: Vec<_> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// The grimoire server instance
pub struct Server {
    config: Config,
    catalog: Arc<Catalog>,
    rollers: RollerFactory,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a server that rolls real dice
    pub fn new(config: Config) -> Result<Self> {
        Self::with_rollers(config, api::random_rollers())
    }

    /// Create a server with a custom source of dice
    pub fn with_rollers(config: Config, rollers: RollerFactory) -> Result<Self> {
        let catalog = Catalog::load(&config.data_dir)?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            catalog: Arc::new(catalog),
            rollers,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Get the catalog handle
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.clone()
    }

    /// Build the router
    pub fn router(&self) -> Router {
        let state = AppState::new(self.catalog.clone(), self.rollers.clone());
        api::router(state)
            .layer(TraceLayer::new_for_http())
            .layer(self.config.cors_layer())
    }

    /// Run the server until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        info!(
            environment = %self.config.environment,
            "grimoire listening on {}",
            local_addr
        );

        let router = self.router();
        let mut shutdown_rx = self.shutdown_rx.clone();

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await?;

        info!("grimoire shutdown complete");
        Ok(())
    }

    /// Signal the server to shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Get the configured bind address
    pub fn bind_addr(&self) -> SocketAddr {
        self.config.bind_addr
    }
}
