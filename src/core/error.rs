//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Descriptor structure is invalid (missing or repeated `://`, empty segment)
    #[error("Malformed log descriptor '{descriptor}': {message}")]
    MalformedDescriptor { descriptor: String, message: String },

    /// Descriptor scheme is not `file`
    #[error("Scheme '{scheme}' in log descriptor '{descriptor}' is not supported")]
    UnsupportedScheme { scheme: String, descriptor: String },

    /// An option segment does not split into exactly one `key=value` pair
    #[error("Option '{pair}' in log descriptor '{descriptor}' must have the form key=value")]
    InvalidOptionPair { pair: String, descriptor: String },

    /// Option key other than `rotate` or `level`
    #[error("Unknown option '{key}' in log descriptor '{descriptor}'")]
    UnknownOption { key: String, descriptor: String },

    #[error("Invalid rotation '{value}': rotation must be day|none")]
    InvalidRotation { value: String },

    #[error("Invalid level '{value}': level must be TRC|DBG|INF|WRN|ERR")]
    InvalidLevel { value: String },

    /// The file or rotating writer behind a descriptor could not be opened
    #[error("Failed to open log sink '{path}': {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Write attempted after the sink was closed
    #[error("Log sink '{name}' is closed")]
    SinkClosed { name: String },

    #[error("File rotation failed for '{path}': {message}")]
    FileRotation { path: String, message: String },

    /// Reported through a FATAL-tagged record, never returned
    #[error("Init must be called only once")]
    AlreadyInitialized,

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LoggerError {
    /// Create a malformed descriptor error
    pub fn malformed(descriptor: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::MalformedDescriptor {
            descriptor: descriptor.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported scheme error
    pub fn unsupported_scheme(scheme: impl Into<String>, descriptor: impl Into<String>) -> Self {
        LoggerError::UnsupportedScheme {
            scheme: scheme.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Create an invalid option pair error
    pub fn invalid_pair(pair: impl Into<String>, descriptor: impl Into<String>) -> Self {
        LoggerError::InvalidOptionPair {
            pair: pair.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Create an unknown option error
    pub fn unknown_option(key: impl Into<String>, descriptor: impl Into<String>) -> Self {
        LoggerError::UnknownOption {
            key: key.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn invalid_rotation(value: impl Into<String>) -> Self {
        LoggerError::InvalidRotation {
            value: value.into(),
        }
    }

    pub fn invalid_level(value: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            value: value.into(),
        }
    }

    /// Create a sink open error carrying the underlying IO cause
    pub fn sink_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkOpen {
            path: path.into(),
            source,
        }
    }

    pub fn sink_closed(name: impl Into<String>) -> Self {
        LoggerError::SinkClosed { name: name.into() }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotation {
            path: path.into(),
            message: message.into(),
        }
    }
}
