use thiserror::Error;

/// Errors that can occur while loading or validating a reflection model.
#[derive(Error, Debug)]
pub enum DocrefError {
    #[error("model error: {message}")]
    Model { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `DocrefError`.
pub type Result<T> = std::result::Result<T, DocrefError>;
