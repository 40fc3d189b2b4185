//! Domain Errors
//!
//! Error types for payload construction and REST actions.

use thiserror::Error;

/// Raised when a raw payload cannot be mapped into an entity.
///
/// The partially-built entity is never returned alongside this error.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("Missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("Field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Malformed payload: {source}")]
    Malformed {
        #[from]
        source: serde_json::Error,
    },
}

impl ConstructionError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn invalid(field: &'static str, expected: &'static str) -> Self {
        Self::InvalidField { field, expected }
    }
}

/// Failures reported by the REST collaborator.
///
/// Message actions pass these through untouched.
#[derive(Debug, Error)]
pub enum RestError {
    #[error("API error ({status}) on {method} {path}: {body}")]
    Http {
        status: u16,
        method: String,
        path: String,
        body: String,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl RestError {
    /// HTTP status code, if the request reached the API
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors surfaced by client and message operations
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Rest(#[from] RestError),

    #[error("Client handle was dropped")]
    ClientDropped,

    #[error("Message id mismatch: expected {expected}, got {actual}")]
    IdMismatch { expected: String, actual: String },
}
