use thiserror::Error;

#[derive(Debug, Error)]
pub enum DietError {
    /// Invalid catalog, target or search configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Derived block bounds contradict each other.
    #[error("Model error: {0}")]
    Model(String),

    /// The solver backend failed; the message is passed through unchanged.
    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Food not found: {0}")]
    FoodNotFound(String),

    #[error("No foods selected")]
    NoFoodsSelected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, DietError>;
