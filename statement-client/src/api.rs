//! The statement backend as seen by the client

use async_trait::async_trait;
use statement_core::{LabelRequest, PendingUpload, Transaction};
use std::sync::Arc;

use crate::error::ApiError;

/// Upload endpoint path
pub const PROCESS_STATEMENT_PATH: &str = "/api/process-statement";
/// Label endpoint path
pub const UPDATE_LABEL_PATH: &str = "/api/update-label";

/// A statement file ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub bank: String,
}

impl StatementUpload {
    /// Read the file named by `pending` from disk.
    pub async fn read(pending: &PendingUpload) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(&pending.path).await.map_err(|source| ApiError::Io {
            path: pending.path.clone(),
            source,
        })?;
        let file_name = pending
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "statement.pdf".to_string());

        Ok(Self {
            file_name,
            bytes,
            bank: pending.bank.clone(),
        })
    }
}

/// Shared handle for background use
pub type ApiRef = Arc<dyn StatementApi>;

#[async_trait]
pub trait StatementApi: Send + Sync {
    /// Upload a statement and return the parsed rows.
    async fn process_statement(&self, upload: &StatementUpload) -> Result<Vec<Transaction>, ApiError>;

    /// Persist a label. Only delivery failures are errors.
    async fn update_label(&self, request: &LabelRequest) -> Result<(), ApiError>;
}

#[async_trait]
impl<T: StatementApi + ?Sized> StatementApi for Arc<T> {
    async fn process_statement(&self, upload: &StatementUpload) -> Result<Vec<Transaction>, ApiError> {
        (**self).process_statement(upload).await
    }

    async fn update_label(&self, request: &LabelRequest) -> Result<(), ApiError> {
        (**self).update_label(request).await
    }
}
