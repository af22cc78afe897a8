use thiserror::Error;

#[derive(Error, Debug)]
pub enum KioskError {
    #[error("Failed to fetch content: status {0}")]
    Transport(u16),

    #[error("{0}")]
    Extraction(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("State store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, KioskError>;
