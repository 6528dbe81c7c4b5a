use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode request: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Failed to encode response: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("Invalid plugin parameter: {0}")]
    InvalidParameter(String),

    #[error("File {0} was requested but its descriptor is missing")]
    MissingFile(String),
}
