use thiserror::Error;

/// Library error type for carousel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured photo directory is invalid or unreadable.
    #[error("invalid photo directory: {0}")]
    BadDir(String),

    /// The scan completed but found no images and no defaults applied.
    #[error("no photo sources available")]
    NoSources,

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}
