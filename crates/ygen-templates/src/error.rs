//! Error types for ygen-templates

use thiserror::Error;

/// Result type alias using ygen-templates's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Template location and rendering error types
#[derive(Error, Debug)]
pub enum Error {
    /// A template resource could not be read
    #[error("Failed to read template file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File template without the `---` separator line
    #[error("Invalid template format in {path}: missing --- separator")]
    MissingSeparator { path: String },

    /// File template header missing a required directive
    #[error("Invalid template format in {path}: missing {directive}: directive")]
    MissingDirective { path: String, directive: String },

    /// Directory template manifest could not be parsed
    #[error("Failed to parse template manifest {path}: {source}")]
    ManifestParse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// A template fragment failed to render
    #[error("Failed to render template fragment '{fragment}': {source}")]
    Render {
        fragment: String,
        #[source]
        source: tera::Error,
    },
}

impl Error {
    /// Create a read failed error
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a missing separator error
    pub fn missing_separator(path: impl Into<String>) -> Self {
        Self::MissingSeparator { path: path.into() }
    }

    /// Create a missing directive error
    pub fn missing_directive(path: impl Into<String>, directive: impl Into<String>) -> Self {
        Self::MissingDirective {
            path: path.into(),
            directive: directive.into(),
        }
    }

    /// Create a render error naming the offending fragment
    pub fn render(fragment: impl Into<String>, source: tera::Error) -> Self {
        Self::Render {
            fragment: fragment.into(),
            source,
        }
    }
}
