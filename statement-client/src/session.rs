//! Sequential driver pairing a [`StatementView`] with a backend.

use statement_core::{SelectError, StatementView, SubmitError};
use std::path::Path;
use tracing::{info, warn};

use crate::api::{StatementApi, StatementUpload};

pub struct Session<A> {
    api: A,
    view: StatementView,
}

impl<A: StatementApi> Session<A> {
    pub fn new(api: A, bank: impl Into<String>) -> Self {
        Self {
            api,
            view: StatementView::new(bank),
        }
    }

    pub fn view(&self) -> &StatementView {
        &self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn select_file(&mut self, path: impl AsRef<Path>) -> Result<(), SelectError> {
        self.view.select_file(path)
    }

    /// Upload the selected file and apply the result.
    ///
    /// Only input errors are returned; request failures end up in
    /// `view().error()` with the previous rows left in place.
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        let pending = self.view.begin_submit()?;

        let result = match StatementUpload::read(&pending).await {
            Ok(upload) => self.api.process_statement(&upload).await,
            Err(e) => Err(e),
        };

        let outcome = result.map_err(|e| {
            warn!(request_id = pending.request_id, error = %e, "upload failed");
            e.to_string()
        });
        if let Ok(rows) = &outcome {
            info!(request_id = pending.request_id, rows = rows.len(), "upload applied");
        }
        self.view.finish_upload(pending.request_id, outcome);
        Ok(())
    }

    pub fn open_row(&mut self, index: usize) -> bool {
        self.view.open_row(index)
    }

    pub fn set_draft(&mut self, text: &str) {
        self.view.modal_mut().set_draft(text);
    }

    pub fn cancel_modal(&mut self) {
        self.view.cancel_modal();
    }

    /// Send the open dialog's label. Returns false when there was nothing to send.
    pub async fn save_label(&mut self) -> bool {
        let Some(update) = self.view.begin_save() else {
            return false;
        };

        let result = self.api.update_label(&update.request).await.map_err(|e| {
            warn!(id = %update.request.transaction_id, error = %e, "label update failed");
            e.to_string()
        });
        self.view.finish_save(&update, result);
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.view.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.view.previous_page()
    }
}
