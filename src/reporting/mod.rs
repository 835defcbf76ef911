//! Reporting subsystem.
//!
//! # Data Flow
//! ```text
//! ResolvedConfig (spreadsheet-mode, sheet-id, client-email, client-private-key)
//!     → sink.rs (mode check, credential checks, key normalization)
//!     → open(sheet id) → init(email, key)      [google_sheets.rs]
//!     → Option<SharedSink> handed to the relay engine
//! ```
//!
//! # Design Decisions
//! - Disabled mode is an explicit `None`, never a half-built sink
//! - Initialization failure aborts the bootstrap

pub mod google_sheets;
pub mod sink;

pub use google_sheets::GoogleSheet;
pub use sink::{maybe_create_sink, ReportingError, ReportingSettings, ReportingSink, SharedSink};
