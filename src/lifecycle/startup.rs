//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve and validate configuration
//! - Derive the relay wallet, then set up reporting
//! - Assemble the service configuration and launch the relay engine
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is rolled back
//! - Stages run in a fixed order, never concurrently
//! - The engine starts last and only once

use std::fmt;

use crate::blockchain::wallet::derive_identity;
use crate::config::loader::ConfigResolver;
use crate::config::validation::validate_config;
use crate::error::BootstrapResult;
use crate::lifecycle::launcher::{launch, RelayEngine, ServiceConfig};
use crate::reporting::{maybe_create_sink, ReportingSettings, ReportingSink};

/// Bootstrap stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BootstrapStage {
    ResolveConfig,
    Validate,
    DeriveIdentity,
    InitReporting,
    LaunchService,
}

impl fmt::Display for BootstrapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResolveConfig => "resolve_config",
            Self::Validate => "validate",
            Self::DeriveIdentity => "derive_identity",
            Self::InitReporting => "init_reporting",
            Self::LaunchService => "launch_service",
        };
        f.write_str(name)
    }
}

/// External collaborators the bootstrap hands work to.
pub trait Collaborators {
    /// Reporting sink type used in spreadsheet mode.
    type Sink: ReportingSink + 'static;
    /// Relay engine type.
    type Engine: RelayEngine;

    /// Open an uninitialized sink on a sheet id.
    fn open_sink(&self, sheet_id: &str) -> Self::Sink;

    /// Construct the relay engine.
    fn build_engine(&self, config: ServiceConfig) -> Self::Engine;
}

fn enter(stage: BootstrapStage) {
    tracing::debug!(stage = %stage, "Entering bootstrap stage");
}

/// Run every stage up to, but not including, the launch.
pub async fn prepare<C: Collaborators>(
    resolver: &ConfigResolver,
    collaborators: &C,
) -> BootstrapResult<ServiceConfig> {
    enter(BootstrapStage::ResolveConfig);
    let config = resolver.resolve_all();

    enter(BootstrapStage::Validate);
    let endpoints = validate_config(&config)?;

    enter(BootstrapStage::DeriveIdentity);
    let identity = derive_identity(
        config.l1_wallet_key.as_deref(),
        config.mnemonic.as_deref(),
        config.hd_path.as_deref(),
        &endpoints.l1_rpc_url,
    )?;

    enter(BootstrapStage::InitReporting);
    let settings = ReportingSettings::from_config(&config);
    let reporting = maybe_create_sink(&settings, |sheet_id| collaborators.open_sink(sheet_id)).await?;

    Ok(ServiceConfig::assemble(&config, endpoints, identity, reporting))
}

/// Run the whole bootstrap and the relay engine.
///
/// Returns when the engine shuts down, or with the first error.
pub async fn run<C: Collaborators>(
    resolver: &ConfigResolver,
    collaborators: &C,
) -> BootstrapResult<()> {
    let service = prepare(resolver, collaborators).await?;

    enter(BootstrapStage::LaunchService);
    launch(service, |config| collaborators.build_engine(config)).await?;

    tracing::info!("Relay service stopped");
    Ok(())
}
