//! Read-only RPC client with timeout handling.
//!
//! # Responsibilities
//! - Connect to a JSON-RPC endpoint
//! - Query basic chain state (chain id, block number, balance)
//! - Bound every call with a timeout

use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

use crate::blockchain::types::{Layer, RpcError, RpcResult};

/// Default timeout for a single RPC call.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// RPC client for one side of the bridge.
#[derive(Clone)]
pub struct ChainClient {
    layer: Layer,
    url: Url,
    provider: DynProvider,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a client. No request is sent until a query is made.
    pub fn new(layer: Layer, url: Url, timeout_duration: Duration) -> Self {
        let provider = ProviderBuilder::new().connect_http(url.clone()).erased();
        Self {
            layer,
            url,
            provider,
            timeout_duration,
        }
    }

    async fn call<T, E, F>(&self, fut: F) -> RpcResult<T>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => Err(RpcError::Rpc {
                layer: self.layer,
                message: e.to_string(),
            }),
            Err(_) => Err(RpcError::Timeout {
                layer: self.layer,
                secs: self.timeout_duration.as_secs(),
            }),
        }
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> RpcResult<u64> {
        self.call(self.provider.get_chain_id()).await
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> RpcResult<u64> {
        self.call(self.provider.get_block_number()).await
    }

    /// Get the balance of an address.
    pub async fn get_balance(&self, address: Address) -> RpcResult<U256> {
        self.call(self.provider.get_balance(address)).await
    }

    /// Get the layer this client talks to.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Get the endpoint URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("layer", &self.layer)
            .field("rpc_url", &self.url.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
