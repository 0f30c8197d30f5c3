use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {resource}")]
    NotFound { resource: String },
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
