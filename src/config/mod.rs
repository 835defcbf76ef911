//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, loader.rs)
//!     → process environment snapshot ─┐
//! command line (cli.rs) ──────────────┤
//!                                     → loader.rs (precedence: argument > env > default,
//!                                                  typed coercion per schema.rs)
//!     → ResolvedConfig (immutable)
//!     → validation.rs (presence, then shape)
//!     → ValidatedEndpoints
//! ```
//!
//! # Design Decisions
//! - Options are declared once, statically, with their type and default
//! - Config is immutable once resolved
//! - Validation fails on the first violation

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::{Cli, Hydrated, LogFormat};
pub use loader::{ConfigResolver, SourceLayer};
pub use schema::ResolvedConfig;
pub use validation::{validate_config, ValidatedEndpoints};
