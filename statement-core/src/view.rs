//! View-model for the statement screen.
//!
//! `StatementView` holds all state the screen renders and is advanced in two
//! steps per network action: a `begin_*` call that validates input and hands
//! back what to send, and a `finish_*` call that applies the outcome. The
//! caller owns the actual request, which keeps this type free of I/O.

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{SelectError, SubmitError};
use crate::modal::LabelModal;
use crate::pagination::{self, Pager};
use crate::transaction::{RowKey, Transaction, TransactionList};

/// Bank selector sent with every upload unless configured otherwise
pub const DEFAULT_BANK: &str = "saraswat";

/// Shown when a label update could not be delivered
pub const LABEL_FAILURE_MESSAGE: &str = "Failed to update label";

/// An upload the caller should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub request_id: u64,
    pub path: PathBuf,
    pub bank: String,
}

/// Body of the update-label request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRequest {
    #[serde(rename = "transactionId")]
    pub transaction_id: Value,
    pub label: String,
}

impl LabelRequest {
    pub fn new(transaction_id: Value, label: impl Into<String>) -> Self {
        Self {
            transaction_id,
            label: label.into(),
        }
    }
}

/// A label update the caller should send, with the row it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelUpdate {
    pub key: RowKey,
    /// Generation of the list `key` points into
    pub generation: u64,
    pub request: LabelRequest,
}

#[derive(Debug, Clone)]
pub struct StatementView {
    bank: String,
    file: Option<PathBuf>,
    transactions: TransactionList,
    pager: Pager,
    modal: LabelModal,
    loading: bool,
    error: Option<String>,
    upload_seq: u64,
    in_flight: Option<u64>,
}

impl Default for StatementView {
    fn default() -> Self {
        Self::new(DEFAULT_BANK)
    }
}

impl StatementView {
    pub fn new(bank: impl Into<String>) -> Self {
        Self {
            bank: bank.into(),
            file: None,
            transactions: TransactionList::default(),
            pager: Pager::new(),
            modal: LabelModal::default(),
            loading: false,
            error: None,
            upload_seq: 0,
            in_flight: None,
        }
    }

    // ---- file intake & upload ----

    /// Pick the statement to upload. Only PDF files are offered.
    pub fn select_file(&mut self, path: impl AsRef<Path>) -> Result<(), SelectError> {
        let path = path.as_ref();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(SelectError::NotPdf(path.to_path_buf()));
        }
        self.file = Some(path.to_path_buf());
        self.error = None;
        Ok(())
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn bank(&self) -> &str {
        &self.bank
    }

    /// Start an upload of the selected file.
    pub fn begin_submit(&mut self) -> Result<PendingUpload, SubmitError> {
        if self.loading {
            return Err(SubmitError::InFlight);
        }
        let Some(path) = self.file.clone() else {
            self.error = Some(SubmitError::NoFile.to_string());
            return Err(SubmitError::NoFile);
        };

        self.upload_seq += 1;
        self.in_flight = Some(self.upload_seq);
        self.loading = true;
        self.error = None;

        Ok(PendingUpload {
            request_id: self.upload_seq,
            path,
            bank: self.bank.clone(),
        })
    }

    /// Apply the outcome of upload `request_id`.
    ///
    /// Returns false (and changes nothing) for a request that is no longer
    /// the one in flight.
    pub fn finish_upload(&mut self, request_id: u64, result: Result<Vec<Transaction>, String>) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(rows) => {
                self.transactions.replace(rows);
                self.pager.reset();
                // the dialog's row belongs to the list that was just discarded
                self.modal.cancel();
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }

    /// Forget an upload that was aborted before it finished.
    pub fn cancel_upload(&mut self, request_id: u64) {
        if self.in_flight == Some(request_id) {
            self.in_flight = None;
            self.loading = false;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Caption of the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.loading { "Processing..." } else { "Upload" }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ---- table & pagination ----

    pub fn transactions(&self) -> &TransactionList {
        &self.transactions
    }

    /// The table and its page controls only appear once there are rows.
    pub fn shows_table(&self) -> bool {
        !self.transactions.is_empty()
    }

    pub fn page(&self) -> usize {
        self.pager.current()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.transactions.len())
    }

    pub fn page_rows(&self) -> &[Transaction] {
        self.pager.slice(self.transactions.rows())
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next(self.transactions.len())
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn is_first_page(&self) -> bool {
        self.pager.is_first()
    }

    pub fn is_last_page(&self) -> bool {
        self.pager.is_last(self.transactions.len())
    }

    // ---- label modal ----

    /// Open the label dialog on the `index`-th row of the current page.
    pub fn open_row(&mut self, index: usize) -> bool {
        self.open_key(RowKey(self.pager.offset() + index))
    }

    /// Open the label dialog on a row of the whole list.
    pub fn open_key(&mut self, key: RowKey) -> bool {
        match self.transactions.get(key) {
            Some(t) => {
                let draft = t.label_draft();
                self.modal.open(key, self.transactions.generation(), draft);
                true
            }
            None => false,
        }
    }

    pub fn modal(&self) -> &LabelModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut LabelModal {
        &mut self.modal
    }

    /// Row the dialog is editing, while it still belongs to the current list.
    pub fn selected(&self) -> Option<&Transaction> {
        if self.modal.generation() != Some(self.transactions.generation()) {
            return None;
        }
        self.modal.target().and_then(|k| self.transactions.get(k))
    }

    pub fn cancel_modal(&mut self) {
        self.modal.cancel();
    }

    /// The update to send for the open dialog, or `None` when there is no
    /// target row (including one from a replaced list) or the draft is empty.
    pub fn begin_save(&self) -> Option<LabelUpdate> {
        let key = self.modal.target()?;
        let label = self.modal.draft();
        if label.is_empty() {
            return None;
        }
        let txn = self.selected()?;
        Some(LabelUpdate {
            key,
            generation: self.transactions.generation(),
            request: LabelRequest::new(txn.identifier(key), label),
        })
    }

    /// Apply the outcome of a label update.
    ///
    /// The response body is never consulted: a delivered request patches the
    /// row and closes the dialog. A row from a list that has since been
    /// replaced is not patched.
    pub fn finish_save(&mut self, update: &LabelUpdate, result: Result<(), String>) {
        match result {
            Ok(()) => {
                if update.generation == self.transactions.generation() {
                    self.transactions = self.transactions.with_label(update.key, &update.request.label);
                }
                self.modal.cancel();
            }
            Err(_) => {
                self.modal.clear_draft();
                self.error = Some(LABEL_FAILURE_MESSAGE.to_string());
            }
        }
    }
}
