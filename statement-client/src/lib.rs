//! statement-client: HTTP access to the statement backend plus the async drivers that feed a `StatementView`

pub mod api;
pub mod error;
pub mod http;
pub mod session;
pub mod worker;

pub use api::{ApiRef, StatementApi, StatementUpload};
pub use error::ApiError;
pub use http::{DEFAULT_BASE_URL, HttpStatementApi};
pub use session::Session;
pub use worker::{WorkEvent, WorkRequest, run_worker};
