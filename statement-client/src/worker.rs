//! Background request runner for interactive front ends.
//!
//! The screen loop stays synchronous: it sends [`WorkRequest`]s over a tokio
//! channel and drains [`WorkEvent`]s from a std channel between frames.

use statement_core::{LabelUpdate, PendingUpload, Transaction};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::{ApiRef, StatementUpload};

#[derive(Debug, Clone)]
pub enum WorkRequest {
    Upload(PendingUpload),
    /// Abort the upload in flight, if any
    CancelUpload,
    SaveLabel(LabelUpdate),
}

#[derive(Debug, Clone)]
pub enum WorkEvent {
    UploadFinished {
        request_id: u64,
        result: Result<Vec<Transaction>, String>,
    },
    UploadAborted {
        request_id: u64,
    },
    LabelSaved {
        update: LabelUpdate,
        result: Result<(), String>,
    },
}

pub async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<WorkRequest>,
    tx: std::sync::mpsc::Sender<WorkEvent>,
    api: ApiRef,
) {
    let mut current: Option<(u64, JoinHandle<()>)> = None;

    while let Some(req) = rx.recv().await {
        match req {
            WorkRequest::Upload(pending) => {
                abort_upload(&mut current, &tx);

                let api = api.clone();
                let tx2 = tx.clone();
                let request_id = pending.request_id;
                let handle = tokio::spawn(async move {
                    let result = match StatementUpload::read(&pending).await {
                        Ok(upload) => api.process_statement(&upload).await,
                        Err(e) => Err(e),
                    };
                    let result = result.map_err(|e| {
                        warn!(request_id, error = %e, "upload failed");
                        e.to_string()
                    });
                    let _ = tx2.send(WorkEvent::UploadFinished { request_id, result });
                });
                current = Some((request_id, handle));
            }

            WorkRequest::CancelUpload => abort_upload(&mut current, &tx),

            // overlapping saves are allowed; each runs to completion
            WorkRequest::SaveLabel(update) => {
                let api = api.clone();
                let tx2 = tx.clone();
                tokio::spawn(async move {
                    let result = api.update_label(&update.request).await.map_err(|e| {
                        warn!(id = %update.request.transaction_id, error = %e, "label update failed");
                        e.to_string()
                    });
                    let _ = tx2.send(WorkEvent::LabelSaved { update, result });
                });
            }
        }
    }
}

fn abort_upload(current: &mut Option<(u64, JoinHandle<()>)>, tx: &std::sync::mpsc::Sender<WorkEvent>) {
    if let Some((request_id, h)) = current.take() {
        if !h.is_finished() {
            h.abort();
            debug!(request_id, "aborted upload");
            let _ = tx.send(WorkEvent::UploadAborted { request_id });
        }
    }
}
