use thiserror::Error;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Failed to decode input image: {0}")]
    ImageDecodeError(String),

    #[error("Unexpected pixel layout: {0}")]
    ImageFormatError(String),

    #[error("Model returned an empty output vector")]
    EmptyOutputError,

    #[error("Class index {index} is out of range for an output of length {len}")]
    IndexOutOfRangeError { index: usize, len: usize },

    #[error("Model invocation failed: {0}")]
    ModelInvocationError(String),

    #[error("Failed to load model: {0}")]
    ModelLoadError(String),
}

pub type Result<T> = std::result::Result<T, InferenceError>;
