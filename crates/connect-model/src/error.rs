use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid concept id: {0}")]
    InvalidConceptId(String),
    #[error("participant record must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
