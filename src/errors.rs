use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Failed to parse OPML document: {reason}")]
    Parse { reason: String },

    #[error("Path does not resolve to a node: {key}")]
    PathNotFound { key: String },

    #[error("Invalid path key: {0}")]
    InvalidKey(String),

    // The moved-from field cannot be called `source`: thiserror reserves
    // that name for the error-source chain.
    #[error("Cannot move {src} into its own subtree at {dest}")]
    InvalidMove { src: String, dest: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read or write document: {0}")]
    Io(#[from] std::io::Error),
}

pub type OutlineResult<T> = Result<T, OutlineError>;
