use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("No user with id {0}")]
    UserNotFound(u32),

    #[error("No submissions found for user {0}")]
    NoSubmissions(u32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AdminResult<T> = Result<T, AdminError>;
