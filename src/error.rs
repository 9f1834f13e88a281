//! Error types for markdown compilation and site generation

use std::path::PathBuf;

use thiserror::Error;

/// Result type for mdsite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling a document or building a site
#[derive(Error, Debug)]
pub enum Error {
    /// A plain span holds an odd number of an inline delimiter
    #[error("unmatched delimiter `{delimiter}` in \"{text}\"")]
    UnmatchedDelimiter { delimiter: &'static str, text: String },

    /// The document does not open with a level-1 heading
    #[error("document has no title: the first block must be a `# ` heading")]
    MissingTitle,

    /// A page of the site failed to compile
    #[error("failed to generate page from {}", path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
