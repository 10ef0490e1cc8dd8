//! Connector framework error types
//!
//! Error definitions with transient/permanent classification for retry logic.

use thiserror::Error;

/// Error that can occur during connector operations.
#[derive(Debug, Error)]
pub enum ConnectorError {
    // Remote errors (transient)
    /// Target system reported it is temporarily unavailable (503/504).
    ///
    /// The framework never retries internally; this kind is the caller's
    /// signal to re-invoke the same operation with the same page token.
    #[error("target system unavailable: HTTP {status}: {message}")]
    TargetUnavailable { status: u16, message: String },

    /// Network error during communication with the target system.
    #[error("network error: {message}")]
    NetworkError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Remote errors (permanent)
    /// Target system rejected the request (any non-2xx other than 503/504).
    #[error("api error: HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Response body could not be decoded into the expected shape.
    #[error("response decode failed: {message}")]
    DecodeFailed { message: String },

    // Local errors (permanent)
    /// Connector configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A remote record could not be mapped into a valid resource.
    #[error("invalid resource: {message}")]
    InvalidResource { message: String },
}

impl ConnectorError {
    /// Check if this error is transient and the operation should be retried.
    ///
    /// Transient errors are those caused by temporary conditions that may
    /// resolve themselves, such as network issues or remote unavailability.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ConnectorError::TargetUnavailable { .. } | ConnectorError::NetworkError { .. }
        )
    }

    /// Check if this error is permanent and retry won't help.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Get an error code for classification.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            ConnectorError::TargetUnavailable { .. } => "TARGET_UNAVAILABLE",
            ConnectorError::NetworkError { .. } => "NETWORK_ERROR",
            ConnectorError::ApiError { .. } => "API_ERROR",
            ConnectorError::DecodeFailed { .. } => "DECODE_FAILED",
            ConnectorError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            ConnectorError::InvalidResource { .. } => "INVALID_RESOURCE",
        }
    }

    // Convenience constructors

    /// Create a target-unavailable error from a status code and status text.
    pub fn unavailable(status: u16, message: impl Into<String>) -> Self {
        ConnectorError::TargetUnavailable {
            status,
            message: message.into(),
        }
    }

    /// Create an API error from a status code and status text.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ConnectorError::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        ConnectorError::DecodeFailed {
            message: message.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        ConnectorError::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source.
    pub fn network_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::NetworkError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        ConnectorError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an invalid-resource error.
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        ConnectorError::InvalidResource {
            message: message.into(),
        }
    }
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;
