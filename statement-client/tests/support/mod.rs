#![allow(dead_code)]

use async_trait::async_trait;
use statement_client::{ApiError, StatementApi, StatementUpload};
use statement_core::{Cell, LabelRequest, Transaction};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory backend that records every call
#[derive(Default)]
pub struct FakeApi {
    pub uploads: Mutex<Vec<StatementUpload>>,
    pub label_updates: Mutex<Vec<LabelRequest>>,
    pub upload_reply: Mutex<Option<Result<Vec<Transaction>, String>>>,
    pub upload_delay: Option<Duration>,
    pub label_fails: bool,
}

impl FakeApi {
    pub fn replying(rows: Vec<Transaction>) -> Self {
        let api = Self::default();
        api.reply_with(Ok(rows));
        api
    }

    pub fn reply_with(&self, reply: Result<Vec<Transaction>, String>) {
        *self.upload_reply.lock().unwrap() = Some(reply);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn label_count(&self) -> usize {
        self.label_updates.lock().unwrap().len()
    }
}

#[async_trait]
impl StatementApi for FakeApi {
    async fn process_statement(&self, upload: &StatementUpload) -> Result<Vec<Transaction>, ApiError> {
        self.uploads.lock().unwrap().push(upload.clone());
        if let Some(d) = self.upload_delay {
            tokio::time::sleep(d).await;
        }
        let reply = self.upload_reply.lock().unwrap().clone();
        match reply {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(msg)) => Err(ApiError::Server(msg)),
            None => Ok(Vec::new()),
        }
    }

    async fn update_label(&self, request: &LabelRequest) -> Result<(), ApiError> {
        self.label_updates.lock().unwrap().push(request.clone());
        if self.label_fails {
            return Err(ApiError::Decode("connection reset by peer".to_string()));
        }
        Ok(())
    }
}

pub fn txn(date: &str, particulars: &str, label: &str) -> Transaction {
    Transaction {
        date: Some(Cell::Text(date.to_string())),
        particulars: Some(Cell::Text(particulars.to_string())),
        label: Some(label.to_string()),
        ..Default::default()
    }
}

pub fn rows(n: usize) -> Vec<Transaction> {
    (0..n).map(|i| txn("01/04/2023", &format!("UPI/{i}"), "")).collect()
}

/// A small PDF-named file in a fresh temp directory.
pub fn statement_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "statement-client-test-{}-{}",
        std::process::id(),
        name.replace('.', "-")
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.4\n%fake statement\n").unwrap();
    path
}
