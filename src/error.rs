use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsekiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Malformed template: {path}")]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Template hash conflict: {} and {} share a hash but are different structures",
        first.display(),
        second.display()
    )]
    TemplateConflict { first: PathBuf, second: PathBuf },

    #[error("No structures found in {}", dir.display())]
    NoStructures { dir: PathBuf },

    #[error("Failed to walk {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InsekiError {
    /// Short category label used by the error printer.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration error",
            Self::FileRead { .. } | Self::Io(_) => "IO error",
            Self::InvalidPattern { .. } => "Pattern error",
            Self::TemplateParse { .. } | Self::Json(_) => "Template error",
            Self::TemplateConflict { .. } => "Template conflict",
            Self::NoStructures { .. } => "No structures",
            Self::Walk { .. } => "Walk error",
            Self::ThreadPool(_) => "Runtime error",
        }
    }

    /// Optional remediation hint shown under the error message.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoStructures { .. } => Some(
                "Add at least one template (*.json) to the structures directory, or pass --structures",
            ),
            Self::TemplateConflict { .. } => {
                Some("Remove or rename one of the two templates so they hash differently")
            }
            Self::InvalidPattern { .. } => {
                Some("Check the glob syntax of the template's \"name\" fields")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, InsekiError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
