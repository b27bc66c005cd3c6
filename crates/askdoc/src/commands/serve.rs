//! `askdoc serve` command implementation.

use std::path::PathBuf;

use askdoc_config::{CliSettings, Config};
use askdoc_server::{Services, run_server, server_config_from_askdoc_config};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover askdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Completion model (overrides config).
    #[arg(short, long)]
    model: Option<String>,

    /// Enable verbose output (request and append logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            model: self.model,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let services = Services::from_config(&config)?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        if let Some(completion) = &config.completion {
            output.info(&format!("Model: {}", completion.model));
        }
        if config.auth.api_key.is_some() {
            output.info("API key check: enabled");
        } else {
            output.warning("API key check: disabled (no [auth] api_key in config)");
        }

        let server_config = server_config_from_askdoc_config(&config, version.to_owned());
        run_server(server_config, services)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
