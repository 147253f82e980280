//! Error types for model path operations.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelPathError {
    #[error("index {index} out of bounds for model path of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, ModelPathError>;
