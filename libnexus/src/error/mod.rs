//! Error types for libnexus
//!
//! Every registry operation returns [`Result`]. The variants follow the
//! failure points of a request: loading credentials, reaching the host,
//! the status code the registry answered with, decoding the body, and
//! parsing date headers.

use thiserror::Error;


/// Main error type for registry operations
#[derive(Error, Debug)]
pub enum NexusError {
    /// Missing, unreadable or incomplete credentials file
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-level failures (connection refused, DNS, timeout)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The registry answered with a status other than the expected one
    #[error("HTTP Code: {status_code}{}", with_context(.context))]
    Http {
        status_code: u16,
        context: Option<String>,
    },

    /// Response body could not be decoded
    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `last-modified` header missing or not an RFC 1123 date
    #[error("Invalid last-modified header: {value:?}")]
    DateParse {
        value: Option<String>,
        #[source]
        source: Option<chrono::ParseError>,
    },
}

fn with_context(context: &Option<String>) -> String {
    context
        .as_deref()
        .map(|c| format!(", {}", c))
        .unwrap_or_default()
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, NexusError>;

impl NexusError {
    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::configuration("missing nexus_host", Some(".credentials"));
    /// assert!(matches!(err, NexusError::Configuration { .. }));
    /// ```
    pub fn configuration<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn configuration_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new transport error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::transport("connection refused");
    /// assert!(matches!(err, NexusError::Transport { .. }));
    /// ```
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new transport error with a source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an HTTP status error without context.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::http(404);
    /// assert_eq!(err.to_string(), "HTTP Code: 404");
    /// ```
    pub fn http(status_code: u16) -> Self {
        Self::Http {
            status_code,
            context: None,
        }
    }

    /// Creates an HTTP status error annotated with context.
    ///
    /// # Examples
    ///
    /// ```
    /// use libnexus::error::NexusError;
    ///
    /// let err = NexusError::http_with_context(500, "Failed to delete image by assetId: abc, app:1");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "HTTP Code: 500, Failed to delete image by assetId: abc, app:1"
    /// );
    /// ```
    pub fn http_with_context<S: Into<String>>(status_code: u16, context: S) -> Self {
        Self::Http {
            status_code,
            context: Some(context.into()),
        }
    }

    /// Creates a new decode error with a source error.
    pub fn decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new decode error.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a date parse error for a missing header.
    pub fn missing_date() -> Self {
        Self::DateParse {
            value: None,
            source: None,
        }
    }

    /// Creates a date parse error for a header value that did not parse.
    pub fn invalid_date<S: Into<String>>(value: S, source: chrono::ParseError) -> Self {
        Self::DateParse {
            value: Some(value.into()),
            source: Some(source),
        }
    }

    /// Returns the HTTP status code for [`NexusError::Http`] errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
