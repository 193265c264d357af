// src/error.rs

/// Result type used throughout the redscale library
pub type ScalerResult<T> = Result<T, ScalerError>;

/// All possible errors that can occur in the redscale library
#[derive(thiserror::Error, Debug)]
pub enum ScalerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A collaborator hook (job stats source, scale applier) failed
    #[error("Callback execution failed for '{operation}': {message}")]
    CallbackFailed { operation: String, message: String },

    /// `start()` was called on a controller whose timer is already armed
    #[error("Scaling controller is already running")]
    AlreadyRunning,

    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// TOML configuration could not be parsed
    #[cfg(feature = "config-toml")]
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },

    /// YAML configuration could not be scanned
    #[cfg(feature = "config-yaml")]
    #[error("YAML error: {source}")]
    Yaml {
        #[from]
        source: yaml_rust::ScanError,
    },

    /// Metric registration failed
    #[cfg(feature = "prometheus-metrics")]
    #[error("Metrics error: {source}")]
    Metrics {
        #[from]
        source: prometheus::Error,
    },

    /// Generic error for unexpected situations
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

/// Helper methods for creating common errors
impl ScalerError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn callback_failed<S: Into<String>>(operation: S, message: S) -> Self {
        Self::CallbackFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn unexpected<S: Into<String>>(message: S) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

