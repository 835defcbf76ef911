//! Relay engine subsystem.
//!
//! # Data Flow
//! ```text
//! ServiceConfig (from lifecycle::startup)
//!     → StandbyEngine::start
//!         → chain id on L1 and L2 (ChainClient)
//!         → "relayer started" row (reporting sink, if any)
//!         → wait for Shutdown
//! ```
//!
//! # Design Decisions
//! - [`Runtime`] wires the production collaborators for the binary
//! - Message relaying itself lives in the external relay engine

pub mod standby;

pub use standby::StandbyEngine;

use crate::lifecycle::launcher::ServiceConfig;
use crate::lifecycle::startup::Collaborators;
use crate::reporting::GoogleSheet;

/// Production collaborators: Google Sheets reporting and the standby engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct Runtime;

impl Collaborators for Runtime {
    type Sink = GoogleSheet;
    type Engine = StandbyEngine;

    fn open_sink(&self, sheet_id: &str) -> GoogleSheet {
        GoogleSheet::new(sheet_id)
    }

    fn build_engine(&self, config: ServiceConfig) -> StandbyEngine {
        StandbyEngine::new(config)
    }
}
