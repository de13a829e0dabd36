use thiserror::Error;

#[derive(Error, Debug)]
pub enum BittabError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Value {value} cannot be represented with {len} bits")]
    ValueOutOfRange { value: String, len: usize },

    #[error("Bits cannot represent negative values (got {0})")]
    NegativeValue(i128),

    #[error("Bit index {index} out of range for {len}-bit value")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Unsupported data: {0}")]
    UnsupportedData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BittabError>;
