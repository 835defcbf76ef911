//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Bootstrap stages and the relay engine emit tracing events
//!     → logging.rs (EnvFilter → pretty or JSON formatter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields, never interpolated secrets
//! - Format chosen once at startup from `--log-format`

pub mod logging;

pub use logging::init_logging;
