//! Standby relay engine.
//!
//! Confirms both RPC endpoints answer, records a start row when reporting is
//! on, then holds the assembled configuration until a stop signal arrives.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use crate::blockchain::client::{ChainClient, DEFAULT_RPC_TIMEOUT};
use crate::blockchain::types::Layer;
use crate::lifecycle::launcher::{EngineError, RelayEngine, ServiceConfig};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_listener;

/// Engine that connects, reports readiness and waits for shutdown.
#[derive(Debug)]
pub struct StandbyEngine {
    config: ServiceConfig,
    shutdown: Shutdown,
    rpc_timeout: Duration,
    listen_for_signals: bool,
}

impl StandbyEngine {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            shutdown: Shutdown::new(),
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            listen_for_signals: true,
        }
    }

    /// Stop on `shutdown` only, without installing OS signal handlers.
    pub fn with_shutdown(config: ServiceConfig, shutdown: Shutdown) -> Self {
        Self {
            config,
            shutdown,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            listen_for_signals: false,
        }
    }

    pub fn with_rpc_timeout(mut self, rpc_timeout: Duration) -> Self {
        self.rpc_timeout = rpc_timeout;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    async fn check_endpoints(&self) -> Result<(u64, u64), EngineError> {
        let l1 = ChainClient::new(Layer::L1, self.config.l1_rpc_url().clone(), self.rpc_timeout);
        let l2 = ChainClient::new(Layer::L2, self.config.l2_rpc_url().clone(), self.rpc_timeout);

        let l1_chain_id = l1.get_chain_id().await?;
        let l2_chain_id = l2.get_chain_id().await?;

        let relayer = self.config.l1_wallet().address();
        match l1.get_balance(relayer).await {
            Ok(balance) => tracing::info!(relayer = %relayer, balance = %balance, "Relayer balance"),
            Err(e) => tracing::warn!(relayer = %relayer, error = %e, "Could not read relayer balance"),
        }

        match l2.get_block_number().await {
            Ok(head) => tracing::info!(l2_head = head, "L2 head block"),
            Err(e) => tracing::warn!(error = %e, "Could not read L2 head block"),
        }

        Ok((l1_chain_id, l2_chain_id))
    }

    async fn report_start(&self) -> Result<(), EngineError> {
        let Some(sink) = self.config.reporting() else {
            return Ok(());
        };

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let row = vec![
            timestamp.to_string(),
            "relayer started".to_string(),
            self.config.l1_wallet().address().to_string(),
        ];
        sink.append_row(&row).await?;
        Ok(())
    }
}

#[async_trait]
impl RelayEngine for StandbyEngine {
    async fn start(&mut self) -> Result<(), EngineError> {
        let mut stop = self.shutdown.subscribe();

        let (l1_chain_id, l2_chain_id) = self.check_endpoints().await?;
        tracing::info!(
            l1_chain_id,
            l2_chain_id,
            relayer = %self.config.l1_wallet().address(),
            address_manager = %self.config.address_manager(),
            relay_gas_limit = self.config.relay_gas_limit(),
            polling_interval_ms = self.config.polling_interval().as_millis() as u64,
            get_logs_interval = self.config.get_logs_interval(),
            l2_block_offset = self.config.l2_block_offset(),
            l1_start_offset = self.config.l1_start_offset(),
            from_l2_transaction_index = self.config.from_l2_transaction_index(),
            "Relay engine on standby"
        );

        self.report_start().await?;

        let listener = self
            .listen_for_signals
            .then(|| spawn_signal_listener(self.shutdown.clone()));

        let _ = stop.recv().await;
        if let Some(handle) = listener {
            handle.abort();
        }

        tracing::info!("Relay engine stopped");
        Ok(())
    }
}
