//! Common test utilities - GrimoireTest harness for end-to-end testing

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use grimoire::api::{AppState, RollerFactory};
use grimoire::catalog::Catalog;
use grimoire::combat::{DieRoller, ScriptedRoller};
use grimoire::{Config, Server};
use reqwest::Client;
use tokio::task::JoinHandle;

/// The data directory shipped with the crate
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Every request gets a fresh roller replaying the same draws
pub fn scripted_rollers(draws: Vec<u32>) -> RollerFactory {
    Arc::new(move || Box::new(ScriptedRoller::new(draws.clone())) as Box<dyn DieRoller + Send>)
}

/// Router state over the shipped catalog
pub fn app_state(rollers: RollerFactory) -> AppState {
    let catalog = Catalog::load(data_dir()).expect("shipped catalog loads");
    AppState::new(Arc::new(catalog), rollers)
}

/// Test harness that spawns a real grimoire server on a random port
pub struct GrimoireTest {
    pub addr: SocketAddr,
    pub client: Client,
    server: Arc<Server>,
    _handle: JoinHandle<()>,
}

impl GrimoireTest {
    /// Start a server rolling real dice
    pub async fn start() -> Result<Self> {
        Self::start_with(grimoire::api::random_rollers()).await
    }

    /// Start a server whose every request replays `draws`
    pub async fn start_scripted(draws: Vec<u32>) -> Result<Self> {
        Self::start_with(scripted_rollers(draws)).await
    }

    async fn start_with(rollers: RollerFactory) -> Result<Self> {
        // Find a random available port
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        drop(listener);

        let config = Config {
            bind_addr: addr,
            data_dir: data_dir(),
            ..Config::default()
        };

        let server = Arc::new(Server::with_rollers(config, rollers)?);
        let server_clone = server.clone();

        let handle = tokio::spawn(async move {
            if let Err(e) = server_clone.run().await {
                eprintln!("Server error: {}", e);
            }
        });

        let client = Client::builder().timeout(Duration::from_secs(5)).build()?;

        // Poll until server is ready (max 2 seconds)
        let mut ready = false;
        for _ in 0..20 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            if client
                .get(format!("http://{}/health", addr))
                .send()
                .await
                .is_ok()
            {
                ready = true;
                break;
            }
        }

        if !ready {
            panic!("Server failed to start within 2 seconds");
        }

        Ok(Self {
            addr,
            client,
            server,
            _handle: handle,
        })
    }

    /// Get the base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{}", self.base_url(), path))
            .json(body)
            .send()
            .await?)
    }

    /// Shutdown the server gracefully
    pub fn shutdown(&self) {
        self.server.shutdown();
    }
}

impl Drop for GrimoireTest {
    fn drop(&mut self) {
        self.server.shutdown();
    }
}
