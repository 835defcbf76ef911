//! Bootstrap error definitions.
//!
//! Every variant is fatal: the bootstrap stops at the first one and the
//! process exits non-zero without starting the relay engine.

use thiserror::Error;

use crate::lifecycle::launcher::EngineError;
use crate::lifecycle::startup::BootstrapStage;
use crate::reporting::ReportingError;

/// Errors that abort the bootstrap sequence.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// A `.env` file exists but could not be read or parsed.
    #[error("Env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    /// A required option has no value after resolution.
    #[error("Missing required option: {0}")]
    MissingRequiredConfig(&'static str),

    /// A required option is present but malformed.
    #[error("Invalid value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Neither a private key nor a mnemonic was supplied.
    #[error("Missing signing credential: pass one of l1-wallet-key or mnemonic")]
    MissingSigningCredential,

    /// The key, phrase or derivation path was rejected by the signer.
    #[error("Invalid signing credential: {0}")]
    InvalidSigningCredential(String),

    /// Spreadsheet mode is on but one of its credentials is absent.
    #[error("Missing reporting credential: {0}")]
    MissingReportingCredential(&'static str),

    /// The reporting sink's initialization handshake failed.
    #[error("Reporting sink initialization failed: {0}")]
    ReportingInitializationFailed(#[source] ReportingError),

    /// The relay engine's start call failed.
    #[error("Relay service failed: {0}")]
    ServiceLaunchFailed(#[source] EngineError),
}

impl BootstrapError {
    /// Stage of the bootstrap at which this error is raised.
    pub fn stage(&self) -> BootstrapStage {
        match self {
            Self::EnvFile(_) => BootstrapStage::ResolveConfig,
            Self::MissingRequiredConfig(_) | Self::InvalidConfig { .. } => BootstrapStage::Validate,
            Self::MissingSigningCredential | Self::InvalidSigningCredential(_) => {
                BootstrapStage::DeriveIdentity
            }
            Self::MissingReportingCredential(_) | Self::ReportingInitializationFailed(_) => {
                BootstrapStage::InitReporting
            }
            Self::ServiceLaunchFailed(_) => BootstrapStage::LaunchService,
        }
    }
}

/// Result type for bootstrap operations.
pub type BootstrapResult<T> = Result<T, BootstrapError>;
