//! Error type shared by the generation core.

use std::path::PathBuf;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors raised while building or running record generators.
///
/// Malformed leaves, unknown generator kinds and dangling references never
/// surface here: they degrade to literal passthrough or `null` values.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A generator's own options are missing or unusable
    #[error("invalid options for '{kind}' generator: {message}")]
    InvalidOptions { kind: &'static str, message: String },

    /// Failure while building or running the generator of one leaf
    #[error("template '{template}', field '{path}': {source}")]
    Leaf {
        template: String,
        path: String,
        #[source]
        source: Box<GeneratorError>,
    },

    /// A file generator's backing directory could not be listed
    #[error("cannot list file source directory {}: {source}", directory.display())]
    FileSource {
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file picked by a file generator could not be read
    #[error("cannot read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template name missing or ambiguous in its file name
    #[error("cannot derive template name from {}: {reason}", path.display())]
    TemplateName { path: PathBuf, reason: String },

    /// Template file could not be read
    #[error("cannot read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template file is not valid JSON
    #[error("invalid template {}: {source}", path.display())]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Template path or pattern resolved to nothing usable
    #[error("{0}")]
    Discovery(String),

    /// Two templates share a name
    #[error("duplicate template name '{0}'")]
    DuplicateTemplate(String),

    /// Strict mode found templates whose producers cannot run first
    #[error("unresolved template dependencies: {}", .0.join("; "))]
    UnresolvedDependencies(Vec<String>),

    /// Record sink failure
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    /// Record serialization failure
    #[error("cannot serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration file problem
    #[error("config error: {0}")]
    Config(String),
}

impl GeneratorError {
    pub(crate) fn invalid_options(kind: &'static str, message: impl Into<String>) -> Self {
        GeneratorError::InvalidOptions {
            kind,
            message: message.into(),
        }
    }
}
