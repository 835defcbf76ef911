//! Optional reporting sink and its factory.
//!
//! Spreadsheet mode is off by default. When it is on, the three credentials
//! are checked in order (sheet id, client email, client private key) and the
//! sink is opened and initialized before the relay engine starts.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::schema::{ResolvedConfig, CLIENT_EMAIL, CLIENT_PRIVATE_KEY, SHEET_ID};
use crate::error::{BootstrapError, BootstrapResult};

/// Errors raised by a reporting sink.
#[derive(Debug, Error)]
pub enum ReportingError {
    /// Credentials were rejected or a token could not be obtained.
    #[error("Auth error: {0}")]
    Auth(String),

    /// The request could not be sent.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response body was not what the sink expected.
    #[error("Response parse error: {0}")]
    Parse(String),

    /// A write was attempted before `init` succeeded.
    #[error("Reporting sink not initialized")]
    NotInitialized,
}

/// External integration that records relay activity.
///
/// A sink is opened on a resource id, then initialized once with the
/// service-account credentials before any row is written.
#[async_trait]
pub trait ReportingSink: Send + Sync + fmt::Debug {
    /// Authenticate and confirm access to the resource.
    async fn init(&mut self, client_email: &str, private_key: &str) -> Result<(), ReportingError>;

    /// Append one row of cells.
    async fn append_row(&self, row: &[String]) -> Result<(), ReportingError>;
}

/// Shared handle to an initialized sink.
pub type SharedSink = Arc<dyn ReportingSink>;

/// Spreadsheet-mode settings taken from the resolved configuration.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ReportingSettings {
    pub enabled: bool,
    pub sheet_id: Option<String>,
    pub client_email: Option<String>,
    pub client_private_key: Option<String>,
}

impl ReportingSettings {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            enabled: config.spreadsheet_mode,
            sheet_id: config.sheet_id.clone(),
            client_email: config.client_email.clone(),
            client_private_key: config.client_private_key.clone(),
        }
    }
}

impl fmt::Debug for ReportingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportingSettings")
            .field("enabled", &self.enabled)
            .field("sheet_id", &self.sheet_id)
            .field("client_email", &self.client_email)
            .field(
                "client_private_key",
                &self.client_private_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Replace literal `\n` escape sequences with real newlines.
///
/// Keys passed through environment variables usually arrive on one line.
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Build and initialize the reporting sink if spreadsheet mode is on.
///
/// `open` constructs an uninitialized sink from the sheet id. Returns `None`
/// without inspecting any credential when the mode is off.
pub async fn maybe_create_sink<S, F>(
    settings: &ReportingSettings,
    open: F,
) -> BootstrapResult<Option<SharedSink>>
where
    S: ReportingSink + 'static,
    F: FnOnce(&str) -> S,
{
    if !settings.enabled {
        tracing::debug!("Spreadsheet mode disabled");
        return Ok(None);
    }

    let sheet_id = require(SHEET_ID.name(), &settings.sheet_id)?;
    let client_email = require(CLIENT_EMAIL.name(), &settings.client_email)?;
    let private_key = require(CLIENT_PRIVATE_KEY.name(), &settings.client_private_key)?;
    let private_key = normalize_private_key(private_key);

    let mut sink = open(sheet_id);
    sink.init(client_email, &private_key)
        .await
        .map_err(BootstrapError::ReportingInitializationFailed)?;

    tracing::info!(sheet_id = %sheet_id, client_email = %client_email, "Spreadsheet mode enabled");
    let sink: SharedSink = Arc::new(sink);
    Ok(Some(sink))
}

fn require<'a>(field: &'static str, value: &'a Option<String>) -> BootstrapResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(BootstrapError::MissingReportingCredential(field))
}
