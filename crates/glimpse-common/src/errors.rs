use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("loader construction failed: {0}")]
    LoaderConstruction(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GlimpseError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Preview(#[from] PreviewError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
