use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Retrieval failed: {0}")]
    Retrieval(String),
}

impl Error {
    /// Wrap a backend failure. The message is kept for logs; callers
    /// facing clients must not leak it.
    pub fn retrieval<E: std::fmt::Display>(err: E) -> Self {
        Self::Retrieval(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
