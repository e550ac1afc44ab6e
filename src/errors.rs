use thiserror::Error;

/// Errors that can occur while building a family graph or resolving a relation.
#[derive(Error, Debug)]
pub enum KinshipError {
    #[error("unknown person '{name}' referenced in {field}")]
    UnknownPerson { name: String, field: String },

    #[error("malformed couple at index {index}: expected 2 names, found {len}")]
    MalformedCouple { index: usize, len: usize },

    #[error("no term for gender '{gender}' under code '{code}'")]
    UnknownGender { gender: String, code: String },

    #[error("file error: {message} (path: {path})")]
    File { message: String, path: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `KinshipError`.
pub type Result<T> = std::result::Result<T, KinshipError>;
