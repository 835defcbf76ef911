//! Chain-specific types and error definitions.

use thiserror::Error;

/// Which side of the bridge an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    L1,
    L2,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::L1 => f.write_str("l1"),
            Layer::L2 => f.write_str("l2"),
        }
    }
}

/// Errors that can occur during RPC calls.
#[derive(Debug, Error)]
pub enum RpcError {
    /// RPC connection or request failed.
    #[error("{layer} RPC error: {message}")]
    Rpc { layer: Layer, message: String },

    /// RPC request timed out.
    #[error("{layer} RPC timeout after {secs} seconds")]
    Timeout { layer: Layer, secs: u64 },
}

/// Result type for RPC calls.
pub type RpcResult<T> = Result<T, RpcError>;
