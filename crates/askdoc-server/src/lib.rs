//! HTTP server for askdoc.
//!
//! Exposes the question/answer pipeline over HTTP:
//! - `POST /ask` answers a question and records the exchange
//! - `GET /health` reports liveness
//!
//! # Quick Start
//!
//! ```ignore
//! use askdoc_config::{CliSettings, Config};
//! use askdoc_server::{ServerConfig, Services, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load(None, Some(&CliSettings::default())).unwrap();
//!     let services = Services::from_config(&config).unwrap();
//!     let server = askdoc_server::server_config_from_askdoc_config(&config, "0.1.0".to_owned());
//!
//!     run_server(server, services).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (askdoc-server)
//!                      │
//!                      ├─► x-api-key check
//!                      │
//!                      └─► /ask ──► spawn_blocking ──► Conversation::ask
//!                                                         │
//!                                                         ├─► completion service
//!                                                         └─► page-database service
//! ```
//!
//! The pipeline uses blocking HTTP clients, so each question runs on the
//! blocking thread pool. Questions are processed one at a time.

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use askdoc_completion::{CompletionService, OpenAiClient};
use askdoc_config::ConfigError;
use askdoc_core::{MemorySessionStore, RecordOptions, SessionStore};
use askdoc_notion::{DatabaseTarget, DocumentService, NotionClient};

pub use app::create_router;
pub use error::ServerError;
pub use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Required `x-api-key` value (`None` disables the check).
    pub api_key: Option<String>,
    /// Application version reported by `/health`.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5050,
            api_key: None,
            version: String::new(),
        }
    }
}

/// Collaborators of the question/answer pipeline.
#[derive(Clone)]
pub struct Services {
    /// Language-model completion service.
    pub completion: Arc<dyn CompletionService>,
    /// Page-database service.
    pub documents: Arc<dyn DocumentService>,
    /// Session to document mapping.
    pub sessions: Arc<dyn SessionStore>,
    /// Recording options.
    pub record: RecordOptions,
}

impl Services {
    /// Build HTTP-backed services from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the `[notion]` or `[completion]`
    /// section is missing or incomplete.
    pub fn from_config(config: &askdoc_config::Config) -> Result<Self, ConfigError> {
        let notion = config.require_notion()?;
        let completion = config.require_completion()?;

        let target = DatabaseTarget {
            database_id: notion.database_id.clone(),
            title_property: notion.title_property.clone(),
            date_property: notion.date_property().map(str::to_owned),
        };
        let documents = NotionClient::from_config(
            &notion.base_url,
            &notion.api_key,
            &notion.api_version,
            target,
        );
        let completion = OpenAiClient::from_config(
            &completion.base_url,
            &completion.api_key,
            &completion.model,
        );

        Ok(Self {
            completion: Arc::new(completion),
            documents: Arc::new(documents),
            sessions: Arc::new(MemorySessionStore::new()),
            record: RecordOptions {
                question_emoji: notion.question_emoji.clone(),
            },
        })
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the server fails to start.
pub async fn run_server(
    config: ServerConfig,
    services: Services,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(services, config.api_key, config.version));
    let app = create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from askdoc config.
#[must_use]
pub fn server_config_from_askdoc_config(
    config: &askdoc_config::Config,
    version: String,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        api_key: config.auth.api_key.clone(),
        version,
    }
}
