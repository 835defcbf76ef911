//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Resolved options (l1-wallet-key | mnemonic + hd-path, endpoints)
//!     → wallet.rs (credential selection, signer derivation)
//!     → SigningIdentity bound to the L1 endpoint
//!
//! Validated endpoints
//!     → client.rs (read-only RPC with timeouts)
//! ```
//!
//! # Security Constraints
//! - Never log private keys, phrases or anything derived from them but the address
//! - All RPC calls have timeouts

pub mod client;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use types::{Layer, RpcError};
pub use wallet::{derive_identity, IdentityKind, SigningIdentity, SigningIdentitySource};
