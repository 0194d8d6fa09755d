use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeanceError {
    #[error("Resource not found: {0}")]
    NotFound(String),
    
    #[error("Validation error: {0}")]
    Validation(String),
    
    #[error("Configuration error: {0}")]
    Configuration(String),
    
    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),
}

pub type SeanceResult<T> = Result<T, SeanceError>;
