use std::fmt;

#[derive(Debug)]
pub enum ThreaderError {
    Io(std::io::Error),
    Deserialization(Box<bincode::error::DecodeError>),
    Json(serde_json::Error),
    Dataset(String),
    Other(String),
}

impl fmt::Display for ThreaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreaderError::Io(e) => write!(f, "IO error: {}", e),
            ThreaderError::Deserialization(e) => write!(f, "Deserialization error: {}", e),
            ThreaderError::Json(e) => write!(f, "JSON error: {}", e),
            ThreaderError::Dataset(e) => write!(f, "Dataset error: {}", e),
            ThreaderError::Other(e) => write!(f, "Error: {}", e),
        }
    }
}

impl std::error::Error for ThreaderError {}

impl From<std::io::Error> for ThreaderError {
    fn from(err: std::io::Error) -> Self {
        ThreaderError::Io(err)
    }
}

impl From<Box<bincode::error::DecodeError>> for ThreaderError {
    fn from(err: Box<bincode::error::DecodeError>) -> Self {
        ThreaderError::Deserialization(err)
    }
}

impl From<bincode::error::DecodeError> for ThreaderError {
    fn from(err: bincode::error::DecodeError) -> Self {
        ThreaderError::Deserialization(Box::new(err))
    }
}

impl From<serde_json::Error> for ThreaderError {
    fn from(err: serde_json::Error) -> Self {
        ThreaderError::Json(err)
    }
}

impl From<String> for ThreaderError {
    fn from(err: String) -> Self {
        ThreaderError::Other(err)
    }
}

impl From<&str> for ThreaderError {
    fn from(err: &str) -> Self {
        ThreaderError::Other(err.to_string())
    }
}
