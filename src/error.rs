use thiserror::Error;

#[derive(Debug, Error)]
pub enum NutriError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Plan must contain at least one resolvable food")]
    EmptyPlan,
}

pub type Result<T> = std::result::Result<T, NutriError>;
