use std::path::{Path, PathBuf};

/// Convenience result type used across postergrid.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy for poster builds.
///
/// Every failure aborts the build; no partial poster is ever returned.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// A source image could not be read or decoded.
    #[error("image load error: {}: {message}", path.display())]
    ImageLoad {
        /// Offending input path.
        path: PathBuf,
        /// Decoder or IO message.
        message: String,
    },

    /// Invalid numeric or structural configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Inconsistent cell geometry detected during composition.
    #[error("layout error: {0}")]
    Layout(String),

    /// No usable font face for a requested family or path.
    #[error("font error: {0}")]
    Font(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::ImageLoad`] value for `path`.
    pub fn image_load(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::ImageLoad {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Build a [`PosterError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PosterError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`PosterError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
