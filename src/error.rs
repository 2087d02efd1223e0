//! Error type shared by all tools.

use std::io;
use std::path::PathBuf;

/// Errors produced while reading, scanning or rewriting test files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File missing or unreadable (or not writable, when migrating).
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line is not terminated by `\n`.
    #[error("line {line} is missing its line terminator (truncated file?)")]
    MissingTerminator { line: usize },

    /// A result line has no `->` separator.
    #[error("line {line} is not of the form `<identifier> -> <value>`: {text:?}")]
    MissingSeparator { line: usize, text: String },

    /// The accumulated directive document is not valid YAML.
    #[error("cannot parse directive document: {0}")]
    Document(#[from] serde_yaml::Error),

    /// The directive document parsed, but not into a key/value mapping.
    #[error("directive document is not a key/value mapping")]
    NotAMapping,

    /// A required key is absent from the directive document.
    #[error("directive document has no `{0}` key")]
    MissingKey(String),

    /// A key of the directive document is not a plain string.
    #[error("directive document key is not a string: {0}")]
    InvalidKey(String),

    /// The domain list is neither a string nor a list of strings.
    #[error("`{0}` must be a list of domain names")]
    InvalidDomainList(String),

    /// A configuration value could not be rendered as an assignment.
    #[error("cannot render configuration value: {0}")]
    Render(#[from] serde_json::Error),

    /// Text is not a well-formed `(fp #b.. #b.. #x..)` literal.
    #[error("malformed floating-point literal: {0:?}")]
    InvalidLiteral(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is a structural problem with the input rather than an I/O failure.
    pub fn is_format_error(&self) -> bool {
        !matches!(self, Error::Io { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
