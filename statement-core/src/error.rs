//! Errors raised by the view before any request is made

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("not a PDF file: {}", .0.display())]
    NotPdf(PathBuf),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Please select a file")]
    NoFile,

    #[error("an upload is already in progress")]
    InFlight,
}
