use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Conflicting walker options.
    #[error("{0}")]
    Config(String),
    /// Aborts the innermost open container only.
    ///
    /// Never returned from [`Walker::handle_path`](crate::Walker::handle_path).
    #[error("traversal stopped")]
    Stop,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn other<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Other(error.into())
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

impl From<walkdir::Error> for Error {
    fn from(other: walkdir::Error) -> Self {
        Self::Io(other.into())
    }
}
