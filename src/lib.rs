//! Cross-domain message relayer bootstrap library.

pub mod blockchain;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod reporting;

pub use config::{ConfigResolver, ResolvedConfig};
pub use error::{BootstrapError, BootstrapResult};
pub use lifecycle::{BootstrapStage, Collaborators, RelayEngine, ServiceConfig, Shutdown};
