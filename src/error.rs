use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A directory requested for listing does not exist.
    #[error("directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// File mutation that has no implementation yet.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// An external program failed to start or exited unsuccessfully.
    #[error("{program}: {source}")]
    Process {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
