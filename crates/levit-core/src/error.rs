use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevitError {
    #[error("invalid frontmatter: {0}")]
    InvalidFrontmatter(String),

    #[error("missing file: {0}")]
    MissingFile(String),

    #[error("feature not found: {0}")]
    FeatureNotFound(String),

    #[error("file already exists: {0}")]
    FileExists(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("path traversal detected: '{path}' resolves outside '{base}'")]
    PathTraversal { path: String, base: String },

    #[error("file too large: {path} ({size} bytes, max {max})")]
    FileTooLarge { path: String, size: u64, max: u64 },

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LevitError>;
