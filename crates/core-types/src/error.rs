use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}
