//! Google Sheets reporting sink.
//!
//! Authenticates with a service account and writes through the Sheets v4
//! REST API. `init` loads the spreadsheet's properties to confirm the
//! account can reach it.

use async_trait::async_trait;
use google_cloud_auth::credentials::service_account::{AccessSpecifier, Builder as ServiceAccountBuilder};
use google_cloud_auth::credentials::{CacheableResource, Credentials};
use http::{Extensions, HeaderMap};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::reporting::sink::{ReportingError, ReportingSink};

/// Sheets API root.
pub const SHEETS_API_URL: &str = "https://sheets.googleapis.com";

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

#[derive(Serialize)]
struct ServiceAccountKey<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    client_email: &'a str,
    private_key: &'a str,
    private_key_id: &'static str,
    project_id: &'static str,
    token_uri: &'static str,
}

#[derive(Deserialize)]
struct SpreadsheetInfo {
    properties: SpreadsheetProperties,
}

#[derive(Deserialize)]
struct SpreadsheetProperties {
    title: String,
}

#[derive(Serialize)]
struct ValueRange<'a> {
    values: [&'a [String]; 1],
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    #[serde(default)]
    table_range: Option<String>,
}

struct Session {
    credentials: Credentials,
    cached_headers: RwLock<Option<HeaderMap>>,
    title: String,
}

/// A spreadsheet addressed by id.
pub struct GoogleSheet {
    sheet_id: String,
    base_url: String,
    client: Client,
    session: Option<Session>,
}

impl GoogleSheet {
    /// Open a spreadsheet handle. No request is sent until `init`.
    pub fn new(sheet_id: &str) -> Self {
        Self::with_base_url(sheet_id, SHEETS_API_URL)
    }

    /// Open a spreadsheet handle against a different API root.
    pub fn with_base_url(sheet_id: &str, base_url: &str) -> Self {
        Self {
            sheet_id: sheet_id.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            session: None,
        }
    }

    /// Spreadsheet title, once initialized.
    pub fn title(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.title.as_str())
    }

    fn spreadsheet_url(&self) -> String {
        format!("{}/v4/spreadsheets/{}", self.base_url, self.sheet_id)
    }

    async fn auth_headers(credentials: &Credentials, cache: &RwLock<Option<HeaderMap>>) -> Result<HeaderMap, ReportingError> {
        let headers = credentials
            .headers(Extensions::new())
            .await
            .map_err(|e| ReportingError::Auth(e.to_string()))?;

        match headers {
            CacheableResource::New { data, .. } => {
                *cache.write().await = Some(data.clone());
                Ok(data)
            }
            CacheableResource::NotModified => cache
                .read()
                .await
                .clone()
                .ok_or_else(|| ReportingError::Auth("token not modified but not cached".to_string())),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ReportingError> {
        let resp = request
            .send()
            .await
            .map_err(|e| ReportingError::Http(e.to_string()))?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ReportingError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| ReportingError::Parse(format!("{}: {}", e, text)))
    }
}

#[async_trait]
impl ReportingSink for GoogleSheet {
    async fn init(&mut self, client_email: &str, private_key: &str) -> Result<(), ReportingError> {
        let key = serde_json::to_value(ServiceAccountKey {
            kind: "service_account",
            client_email,
            private_key,
            private_key_id: "",
            project_id: "",
            token_uri: TOKEN_URI,
        })
        .map_err(|e| ReportingError::Auth(e.to_string()))?;
        let credentials = ServiceAccountBuilder::new(key)
            .with_access_specifier(AccessSpecifier::from_scopes([SHEETS_SCOPE]))
            .build()
            .map_err(|e| ReportingError::Auth(e.to_string()))?;

        let cache = RwLock::new(None);
        let headers = Self::auth_headers(&credentials, &cache).await?;
        let info: SpreadsheetInfo = self
            .send(
                self.client
                    .get(self.spreadsheet_url())
                    .query(&[("fields", "properties.title")])
                    .headers(headers),
            )
            .await?;

        let title = info.properties.title;

        tracing::info!(sheet_id = %self.sheet_id, title = %title, "Spreadsheet loaded");

        self.session = Some(Session {
            credentials,
            cached_headers: cache,
            title,
        });
        Ok(())
    }

    async fn append_row(&self, row: &[String]) -> Result<(), ReportingError> {
        let session = self.session.as_ref().ok_or(ReportingError::NotInitialized)?;
        let headers = Self::auth_headers(&session.credentials, &session.cached_headers).await?;

        let url = format!("{}/values/A1:append", self.spreadsheet_url());
        let appended: AppendResponse = self
            .send(
                self.client
                    .post(url)
                    .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
                    .headers(headers)
                    .json(&ValueRange { values: [row] }),
            )
            .await?;

        tracing::debug!(
            sheet_id = %self.sheet_id,
            cells = row.len(),
            table_range = ?appended.table_range,
            "Row appended"
        );
        Ok(())
    }
}

impl std::fmt::Debug for GoogleSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheet")
            .field("sheet_id", &self.sheet_id)
            .field("base_url", &self.base_url)
            .field("title", &self.title())
            .finish()
    }
}
