use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("A scenario named '{0}' already exists.")]
    DuplicateName(String),

    #[error("Stored email is no longer valid: {0}")]
    InvalidRecord(#[from] core_types::CoreError),

    #[error("The requested data was not found in the database.")]
    NotFound,
}
