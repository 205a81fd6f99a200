//! Error types for manifest construction and emission.

/// Error types for fob-manifest operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The host exposed neither an ordered entrypoint map nor a property-keyed object.
    #[error("Unsupported entrypoints: {0}")]
    UnsupportedEntrypoints(String),

    /// The chunk graph references a chunk or group it does not contain.
    #[error("Invalid chunk graph: {0}")]
    InvalidGraph(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Manifest filename cannot be mapped onto the output directory.
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// A user supplied `map` or `filter` strategy failed.
    #[error("Transform failed for '{path}': {message}")]
    Transform { path: String, message: String },

    /// The manifest serializer failed.
    #[error("Serialize failure: {0}")]
    Serialize(String),

    /// Writing the manifest artifact failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fob-manifest operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a [`Error::Transform`] raised by a user strategy.
    pub fn transform(path: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::Transform {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::UnsupportedEntrypoints(_) => "UNSUPPORTED_ENTRYPOINTS",
            Error::InvalidGraph(_) => "INVALID_GRAPH",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::Transform { .. } => "TRANSFORM_FAILURE",
            Error::Serialize(_) => "SERIALIZE_FAILURE",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::Io(_) => "IO_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::UnsupportedEntrypoints(_) => Some(Box::new(
                "The bundler host must expose entrypoints as an ordered map or a keyed object.\nCheck that the plugin runs against a supported host version.",
            )),
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check your manifest configuration.\nError: {}",
                msg
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The manifest filename '{}' must name a file, either relative to the output directory or absolute.",
                path
            ))),
            Error::Transform { path, .. } => Some(Box::new(format!(
                "A custom map/filter function failed while processing '{}'. Fix the function and rebuild.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write the manifest. Check disk space and permissions.\nError: {}",
                msg
            ))),
            _ => None,
        }
    }
}
