//! Read-only client for the Formbase REST API
//!
//! Issues plain GET requests against a PostgREST deployment and decodes the
//! JSON rows. No credentials are attached.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::fields::{Field, FieldCatalog};
use crate::filters::{FilterSet, validate_set};
use crate::query::{FIELD_ENDPOINT, RECORD_ENDPOINT, RecordQuery, form_fields_path};

const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub record_endpoint: String,
    pub field_endpoint: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            record_endpoint: RECORD_ENDPOINT.to_string(),
            field_endpoint: FIELD_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

pub struct RecordClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl RecordClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("formbase/{}", CURRENT_VERSION))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Field rows of a form
    pub async fn form_fields(&self, form_id: i64) -> Result<Vec<Field>, ClientError> {
        let path = form_fields_path(&self.config.field_endpoint, form_id);
        self.get_json(&path).await
    }

    /// Catalog built from the field rows of a form
    pub async fn field_catalog(&self, form_id: i64) -> Result<FieldCatalog, ClientError> {
        let fields = self.form_fields(form_id).await?;
        Ok(FieldCatalog::from_fields(fields))
    }

    /// Records of a form matching a filter set, as raw JSON rows
    pub async fn filter_records(
        &self,
        form_id: i64,
        set: &FilterSet,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        let query = RecordQuery::new(form_id).with_filters(set);
        self.get_json(&query.path(&self.config.record_endpoint))
            .await
    }

    /// Validate a filter set against the form's fields, then fetch matching records
    pub async fn filter_records_checked(
        &self,
        form_id: i64,
        set: &FilterSet,
    ) -> Result<Vec<serde_json::Value>, ClientError> {
        let catalog = self.field_catalog(form_id).await?;
        validate_set(set, &catalog)?;
        self.filter_records(form_id, set).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        tracing::debug!(url = %url, "GET");

        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %body, "Request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
