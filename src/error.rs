use thiserror::Error;

#[derive(Error, Debug)]
pub enum CicastError {
    #[error("Artifact load failed: {0}")]
    Artifact(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

pub type Result<T> = std::result::Result<T, CicastError>;
