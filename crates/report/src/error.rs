use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report content: {0}")]
    Write(#[from] std::fmt::Error),
}
