//! Error types for the colloquy client.
//!
//! This module defines the error type system for everything that can go
//! wrong while talking to the chat backend or managing local state.

use std::error;
use std::fmt;
use std::io;
use std::sync::Arc;

/// The main error type for the colloquy client.
#[derive(Clone, Debug)]
pub enum Error {
    /// A generic backend API error occurred.
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Human-readable error message.
        message: String,
    },

    /// Resource not found.
    NotFound {
        /// Human-readable error message.
        message: String,
        /// Resource type.
        resource_type: Option<String>,
        /// Resource ID.
        resource_id: Option<String>,
    },

    /// Request timeout.
    Timeout {
        /// Human-readable error message.
        message: String,
        /// Duration of the timeout in seconds.
        duration: Option<f64>,
    },

    /// Connection error.
    Connection {
        /// Human-readable error message.
        message: String,
        /// Underlying cause.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Server returned a 500 internal error.
    InternalServer {
        /// Human-readable error message.
        message: String,
    },

    /// Server is overloaded or unavailable.
    ServiceUnavailable {
        /// Human-readable error message.
        message: String,
    },

    /// Error during JSON serialization or deserialization.
    Serialization {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// I/O error.
    Io {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Arc<io::Error>,
    },

    /// HTTP client error.
    HttpClient {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },

    /// Error during validation of operation parameters.
    Validation {
        /// Human-readable error message.
        message: String,
        /// Parameter that failed validation.
        param: Option<String>,
    },

    /// A URL parsing or manipulation error.
    Url {
        /// Human-readable error message.
        message: String,
        /// The underlying error.
        source: Option<url::ParseError>,
    },
}

impl Error {
    /// Creates a new API error.
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new not found error.
    pub fn not_found(
        message: impl Into<String>,
        resource_type: Option<String>,
        resource_id: Option<String>,
    ) -> Self {
        Error::NotFound {
            message: message.into(),
            resource_type,
            resource_id,
        }
    }

    /// Creates a new timeout error.
    pub fn timeout(message: impl Into<String>, duration: Option<f64>) -> Self {
        Error::Timeout {
            message: message.into(),
            duration,
        }
    }

    /// Creates a new connection error.
    pub fn connection(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Connection {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new internal server error.
    pub fn internal_server(message: impl Into<String>) -> Self {
        Error::InternalServer {
            message: message.into(),
        }
    }

    /// Creates a new service unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Error::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Creates a new serialization error.
    pub fn serialization(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::Serialization {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new I/O error.
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source: Arc::new(source),
        }
    }

    /// Creates a new HTTP client error.
    pub fn http_client(
        message: impl Into<String>,
        source: Option<Box<dyn error::Error + Send + Sync>>,
    ) -> Self {
        Error::HttpClient {
            message: message.into(),
            source: source.map(Arc::from),
        }
    }

    /// Creates a new validation error.
    pub fn validation(message: impl Into<String>, param: Option<String>) -> Self {
        Error::Validation {
            message: message.into(),
            param,
        }
    }

    /// Creates a new URL error.
    pub fn url(message: impl Into<String>, source: Option<url::ParseError>) -> Self {
        Error::Url {
            message: message.into(),
            source,
        }
    }

    /// Returns true if this error is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns true if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Returns true if this error is a connection error.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection { .. })
    }

    /// Returns true if this error is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Error::InternalServer { .. } | Error::ServiceUnavailable { .. }
        )
    }

    /// Returns true if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Returns the status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Api {
                status_code,
                message,
            } => {
                write!(f, "API error (status {status_code}): {message}")
            }
            Error::NotFound {
                message,
                resource_type,
                resource_id,
            } => {
                let prefix = if let Some(resource_type) = resource_type {
                    format!("Resource not found ({resource_type})")
                } else {
                    "Resource not found".to_string()
                };

                let suffix = if let Some(resource_id) = resource_id {
                    format!(" [ID: {resource_id}]")
                } else {
                    "".to_string()
                };

                write!(f, "{prefix}: {message}{suffix}")
            }
            Error::Timeout { message, duration } => {
                if let Some(duration) = duration {
                    write!(f, "Timeout error: {message} ({duration} seconds)")
                } else {
                    write!(f, "Timeout error: {message}")
                }
            }
            Error::Connection { message, .. } => {
                write!(f, "Connection error: {message}")
            }
            Error::InternalServer { message } => {
                write!(f, "Internal server error: {message}")
            }
            Error::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {message}")
            }
            Error::Serialization { message, .. } => {
                write!(f, "Serialization error: {message}")
            }
            Error::Io { message, .. } => {
                write!(f, "I/O error: {message}")
            }
            Error::HttpClient { message, .. } => {
                write!(f, "HTTP client error: {message}")
            }
            Error::Validation { message, param } => {
                if let Some(param) = param {
                    write!(f, "Validation error: {message} (parameter: {param})")
                } else {
                    write!(f, "Validation error: {message}")
                }
            }
            Error::Url { message, .. } => {
                write!(f, "URL error: {message}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Connection { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Serialization { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Io { source, .. } => Some(source),
            Error::HttpClient { source, .. } => source
                .as_ref()
                .map(|e| e.as_ref() as &(dyn error::Error + 'static)),
            Error::Url { source, .. } => {
                source.as_ref().map(|e| e as &(dyn error::Error + 'static))
            }
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io(err.to_string(), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::serialization(format!("JSON error: {err}"), Some(Box::new(err)))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::url(format!("URL parse error: {err}"), Some(err))
    }
}

/// A specialized Result type for colloquy operations.
pub type Result<T> = std::result::Result<T, Error>;
