//! Search index error types.
//!
//! The error taxonomy distinguishes transport failures (the store could not
//! be reached) from application-level rejections (the store answered with an
//! error status). The pipeline treats both as a failed write, but operators
//! diagnosing an outage need to tell them apart.

use thiserror::Error;

/// Unified errors from search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Validation error (e.g., missing document identifier).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to establish connection to the search index backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request never produced a response from the store.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The store answered with a non-success status.
    #[error("Application error (status {status}): {body}")]
    ApplicationError { status: u16, body: String },

    /// Failed to serialize a document for the search index backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create an application error from a response status and body.
    pub fn application(status: u16, body: impl Into<String>) -> Self {
        Self::ApplicationError {
            status,
            body: body.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_display() {
        let err = SearchIndexError::application(400, "mapper_parsing_exception");
        assert_eq!(
            err.to_string(),
            "Application error (status 400): mapper_parsing_exception"
        );
    }

    #[test]
    fn test_constructor_helpers() {
        assert!(matches!(
            SearchIndexError::transport("connection refused"),
            SearchIndexError::TransportError(_)
        ));
        assert!(matches!(
            SearchIndexError::validation("empty id"),
            SearchIndexError::ValidationError(_)
        ));
    }
}
