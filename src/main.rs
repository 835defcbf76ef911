//! Message relayer (v1)
//!
//! Boots the L1/L2 cross-domain message relayer.
//!
//! # Architecture Overview
//!
//! ```text
//!   .env ──▶ environment ─┐
//!   argv  ──▶ clap ───────┤
//!                         ▼
//!                 ┌──────────────┐    ┌────────────┐    ┌──────────────┐
//!                 │    config    │───▶│ validation │───▶│  blockchain  │
//!                 │   resolver   │    │            │    │ L1 wallet    │
//!                 └──────────────┘    └────────────┘    └──────┬───────┘
//!                                                              │
//!                                                              ▼
//!                 ┌──────────────┐    ┌────────────┐    ┌──────────────┐
//!                 │    engine    │◀───│  launcher  │◀───│  reporting   │
//!                 │  (standby)   │    │            │    │ Google Sheet │
//!                 └──────────────┘    └────────────┘    └──────────────┘
//! ```
//!
//! Every stage failure is logged with its stage and ends the process with a
//! non-zero exit code before the relay engine is started.

use std::process::ExitCode;

use message_relayer::config::{Cli, ConfigResolver, Hydrated};
use message_relayer::engine::Runtime;
use message_relayer::error::BootstrapError;
use message_relayer::lifecycle::startup;
use message_relayer::observability::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let Hydrated { cli, options, env_file } = Cli::parse_hydrated();

    if let Err(e) = init_logging(cli.log_format) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "message-relayer starting");

    let result = match env_file {
        Ok(loaded) => {
            if let Some(path) = loaded {
                tracing::info!(path = %path.display(), "Loaded env file");
            }
            let resolver = ConfigResolver::from_process(options);
            startup::run(&resolver, &Runtime).await
        }
        Err(e) => Err(BootstrapError::from(e)),
    };

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(stage = %e.stage(), error = %e, "Bootstrap failed");
            ExitCode::FAILURE
        }
    }
}
