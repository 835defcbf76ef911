//! Service assembly and hand-off to the relay engine.
//!
//! # Responsibilities
//! - Assemble the immutable [`ServiceConfig`] from the validated pieces
//! - Construct the relay engine from it and call `start` exactly once
//!
//! # Design Decisions
//! - No retries here; the engine owns its own retry loop
//! - The engine takes ownership of the configuration

use std::time::Duration;

use alloy::primitives::Address;
use async_trait::async_trait;
use url::Url;

use crate::blockchain::wallet::SigningIdentity;
use crate::config::schema::ResolvedConfig;
use crate::config::validation::ValidatedEndpoints;
use crate::error::{BootstrapError, BootstrapResult};
use crate::reporting::SharedSink;

/// Error returned by a relay engine.
pub type EngineError = Box<dyn std::error::Error + Send + Sync>;

/// Long-running relay engine.
#[async_trait]
pub trait RelayEngine: Send {
    /// Run the engine. Resolves on graceful shutdown, fails on a fatal error.
    async fn start(&mut self) -> Result<(), EngineError>;
}

/// Everything the relay engine needs, fixed at startup.
#[derive(Debug)]
pub struct ServiceConfig {
    l1_rpc_url: Url,
    l2_rpc_url: Url,
    address_manager: Address,
    l1_wallet: SigningIdentity,
    relay_gas_limit: u64,
    from_l2_transaction_index: u64,
    polling_interval: Duration,
    get_logs_interval: u64,
    l2_block_offset: u64,
    l1_start_offset: u64,
    reporting: Option<SharedSink>,
}

impl ServiceConfig {
    /// Assemble the service configuration.
    pub fn assemble(
        config: &ResolvedConfig,
        endpoints: ValidatedEndpoints,
        l1_wallet: SigningIdentity,
        reporting: Option<SharedSink>,
    ) -> Self {
        Self {
            l1_rpc_url: endpoints.l1_rpc_url,
            l2_rpc_url: endpoints.l2_rpc_url,
            address_manager: endpoints.address_manager,
            l1_wallet,
            relay_gas_limit: config.relay_gas_limit,
            from_l2_transaction_index: config.from_l2_transaction_index,
            polling_interval: Duration::from_millis(config.polling_interval),
            get_logs_interval: config.get_logs_interval,
            l2_block_offset: config.l2_start_offset,
            l1_start_offset: config.l1_start_offset,
            reporting,
        }
    }

    pub fn l1_rpc_url(&self) -> &Url {
        &self.l1_rpc_url
    }

    pub fn l2_rpc_url(&self) -> &Url {
        &self.l2_rpc_url
    }

    pub fn address_manager(&self) -> Address {
        self.address_manager
    }

    /// The relay wallet, bound to the L1 endpoint.
    pub fn l1_wallet(&self) -> &SigningIdentity {
        &self.l1_wallet
    }

    pub fn relay_gas_limit(&self) -> u64 {
        self.relay_gas_limit
    }

    pub fn from_l2_transaction_index(&self) -> u64 {
        self.from_l2_transaction_index
    }

    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    /// Block span of each log query.
    pub fn get_logs_interval(&self) -> u64 {
        self.get_logs_interval
    }

    pub fn l2_block_offset(&self) -> u64 {
        self.l2_block_offset
    }

    pub fn l1_start_offset(&self) -> u64 {
        self.l1_start_offset
    }

    /// Whether relay activity is recorded to a spreadsheet.
    pub fn spreadsheet_mode(&self) -> bool {
        self.reporting.is_some()
    }

    /// The reporting sink, when spreadsheet mode is on.
    pub fn reporting(&self) -> Option<&SharedSink> {
        self.reporting.as_ref()
    }
}

/// Construct the engine from `config` and run it.
pub async fn launch<E, F>(config: ServiceConfig, build: F) -> BootstrapResult<()>
where
    E: RelayEngine,
    F: FnOnce(ServiceConfig) -> E,
{
    tracing::info!(
        l1_rpc_url = %config.l1_rpc_url,
        l2_rpc_url = %config.l2_rpc_url,
        address_manager = %config.address_manager,
        relayer = %config.l1_wallet.address(),
        spreadsheet_mode = config.spreadsheet_mode(),
        "Launching relay service"
    );

    let mut engine = build(config);
    engine
        .start()
        .await
        .map_err(BootstrapError::ServiceLaunchFailed)
}
