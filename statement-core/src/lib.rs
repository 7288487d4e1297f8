//! statement-core: view state for the bank statement processor (transactions, pages, label dialog)

pub mod error;
pub mod modal;
pub mod pagination;
pub mod summary;
pub mod transaction;
pub mod view;

pub use error::{SelectError, SubmitError};
pub use modal::LabelModal;
pub use pagination::{PAGE_SIZE, Pager, total_pages};
pub use summary::StatementSummary;
pub use transaction::{Cell, Column, RowKey, Transaction, TransactionList};
pub use view::{DEFAULT_BANK, LABEL_FAILURE_MESSAGE, LabelRequest, LabelUpdate, PendingUpload, StatementView};
