use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Logger error: {0}")]
    Logger(log::SetLoggerError),
    #[error("Toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Input/output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid file name pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("{0}")]
    Walk(#[from] tarwalk::Error),
}

impl From<log::SetLoggerError> for Error {
    fn from(other: log::SetLoggerError) -> Self {
        Self::Logger(other)
    }
}
