//! Notion pages client — create, read, update, and archive rows.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use voxnote_core::{PropertyMap, VoxError};

use crate::format::format_row;

/// Environment variable holding the Notion integration token.
const API_KEY_VAR: &str = "NOTION_API_KEY";

const NOTION_VERSION: &str = "2021-05-13";

/// Outcome of a write against Notion.
///
/// Network failures on writes are logged, not raised: the row may or may not
/// exist remotely. Callers must surface `Unknown` upward rather than
/// declaring success.
#[derive(Debug)]
pub enum WriteOutcome {
    /// Notion acknowledged the write; the response body is attached.
    Confirmed(Value),
    /// The request failed in transit or was rejected; remote state unknown.
    Unknown,
}

impl WriteOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, WriteOutcome::Confirmed(_))
    }

    /// Short label for acknowledgments and logs.
    pub fn label(&self) -> &'static str {
        match self {
            WriteOutcome::Confirmed(_) => "confirmed",
            WriteOutcome::Unknown => "unknown",
        }
    }
}

/// Client for the Notion pages API.
#[derive(Debug)]
pub struct NotionClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.notion.com/v1".to_string(),
        }
    }

    /// Build a client from the environment, failing eagerly (before any
    /// network call) when the credential is absent.
    pub fn from_env() -> Result<Self, VoxError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(VoxError::Credential(format!(
                "{API_KEY_VAR} environment variable is not set"
            ))),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Create a new row in `db_id`.
    pub async fn create_row(&self, db_id: &str, properties: &PropertyMap) -> WriteOutcome {
        let body = format_row(db_id, properties);
        let request = self
            .client
            .post(format!("{}/pages", self.base_url))
            .json(&body);
        match self.send_write("create row", request).await {
            Ok(response) => {
                info!(db_id, "Row created");
                WriteOutcome::Confirmed(response)
            }
            Err(e) => {
                error!(db_id, error = %format!("{e:#}"), "Error while inserting row in Notion");
                WriteOutcome::Unknown
            }
        }
    }

    /// Fetch a page by its id. Reads raise on failure.
    pub async fn get_page(&self, page_id: &str) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/pages/{}", self.base_url, page_id))
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await
            .context("Notion HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Notion returned {}: {}", status, error_body);
        }
        response.json().await.context("Failed to parse Notion response")
    }

    /// Update an existing row's properties.
    pub async fn update_row(
        &self,
        db_id: &str,
        page_id: &str,
        properties: &PropertyMap,
    ) -> WriteOutcome {
        let body = update_body(db_id, properties);
        let request = self
            .client
            .patch(format!("{}/pages/{}", self.base_url, page_id))
            .json(&body);
        match self.send_write("update row", request).await {
            Ok(response) => {
                info!(page_id, "Row updated");
                WriteOutcome::Confirmed(response)
            }
            Err(e) => {
                error!(page_id, error = %format!("{e:#}"), "Error while updating row in Notion");
                WriteOutcome::Unknown
            }
        }
    }

    /// Archive (delete) a row by its page id.
    pub async fn archive_row(&self, page_id: &str) -> WriteOutcome {
        let request = self
            .client
            .delete(format!("{}/blocks/{}", self.base_url, page_id));
        match self.send_write("archive row", request).await {
            Ok(response) => {
                info!(page_id, "Row archived");
                WriteOutcome::Confirmed(response)
            }
            Err(e) => {
                error!(page_id, error = %format!("{e:#}"), "Error while archiving row in Notion");
                WriteOutcome::Unknown
            }
        }
    }

    async fn send_write(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value> {
        debug!(operation, "Sending write to Notion");
        let response = request
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("Notion HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Notion returned {}: {}", status, error_body);
        }
        response.json().await.context("Failed to parse Notion response")
    }
}

/// Body for a row update: same properties shape, without the parent.
fn update_body(db_id: &str, properties: &PropertyMap) -> Value {
    let mut body = format_row(db_id, properties);
    if let Some(map) = body.as_object_mut() {
        map.remove("parent");
    }
    body
}
