//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Validate → Derive identity → Init reporting → Launch
//!
//! Launch (launcher.rs):
//!     ServiceConfig → build engine → start (once)
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger → engine returns → process exits
//! ```
//!
//! # Design Decisions
//! - Ordered startup: nothing external is contacted before validation passes
//! - Every startup failure is fatal and carries the stage it came from
//! - The engine owns the process after launch

pub mod launcher;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use launcher::{launch, EngineError, RelayEngine, ServiceConfig};
pub use shutdown::Shutdown;
pub use startup::{prepare, run, BootstrapStage, Collaborators};
