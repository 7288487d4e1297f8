//! reqwest implementation of [`StatementApi`]

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use statement_core::{LabelRequest, Transaction};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::api::{PROCESS_STATEMENT_PATH, StatementApi, StatementUpload, UPDATE_LABEL_PATH};
use crate::error::ApiError;

/// Address the backend listens on by default
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone)]
pub struct HttpStatementApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStatementApi {
    /// Client with no request timeout: a hung backend keeps the request open.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn upload_form(upload: &StatementUpload) -> Result<Form, ApiError> {
        let file = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str("application/pdf")?;
        Ok(Form::new().part("file", file).text("bank", upload.bank.clone()))
    }

    fn label_request(&self, request: &LabelRequest) -> reqwest::RequestBuilder {
        self.client.post(self.endpoint(UPDATE_LABEL_PATH)).json(request)
    }
}

#[derive(Deserialize)]
struct ProcessResponse {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
}

/// Message carried by a truthy `error` field.
fn error_text(v: &Value) -> Option<String> {
    match v {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Interpret a process-statement response body regardless of its HTTP status.
pub fn parse_process_response(body: &str) -> Result<Vec<Transaction>, ApiError> {
    let resp: ProcessResponse = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if let Some(msg) = resp.error.as_ref().and_then(error_text) {
        return Err(ApiError::Server(msg));
    }

    resp.transactions
        .ok_or_else(|| ApiError::Decode("missing `transactions`".to_string()))
}

#[async_trait]
impl StatementApi for HttpStatementApi {
    async fn process_statement(&self, upload: &StatementUpload) -> Result<Vec<Transaction>, ApiError> {
        let url = self.endpoint(PROCESS_STATEMENT_PATH);
        info!(%url, file = %upload.file_name, bytes = upload.bytes.len(), bank = %upload.bank, "uploading statement");

        let resp = self
            .client
            .post(&url)
            .multipart(Self::upload_form(upload)?)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        debug!(%status, len = body.len(), "process-statement response");

        match parse_process_response(&body) {
            Ok(rows) => {
                info!(rows = rows.len(), "statement processed");
                Ok(rows)
            }
            Err(e) => {
                warn!(%status, error = %e, "statement rejected");
                Err(e)
            }
        }
    }

    async fn update_label(&self, request: &LabelRequest) -> Result<(), ApiError> {
        let resp = self.label_request(request).send().await?;
        debug!(status = %resp.status(), id = %request.transaction_id, "update-label response");
        Ok(())
    }
}
