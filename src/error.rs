//! Error types for NovaStream
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling, and the classification
//! used by the studio to decide how a failed generation is reported.

use thiserror::Error;

/// Marker the generation backend puts in its message when the selected
/// credential does not belong to a project that can reach the model.
pub const CREDENTIAL_ERROR_MARKER: &str = "Requested entity was not found";

/// Main error type for NovaStream operations
#[derive(Error, Debug)]
pub enum NovastreamError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, unexpected responses)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The backend finished an operation with an error payload
    #[error("Generation failed: {0}")]
    Generation(String),

    /// A finished operation carried no downloadable media reference
    #[error("No result: {0}")]
    NoResult(String),

    /// The studio requires a credential to be selected first
    #[error("A credential must be selected before generating videos")]
    CredentialRequired,

    /// No API key could be resolved for the provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// The operation was cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,

    /// Rejected user input (blank prompt, unknown category, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Lookup of a video by id failed
    #[error("Video not found: {0}")]
    NotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for NovaStream operations
///
/// Uses `anyhow::Error` so callers can attach context while the concrete
/// `NovastreamError` stays reachable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;

/// How a failed operation should be treated by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The selected credential is invalid and must be re-selected
    Credential,
    /// The caller cancelled the operation
    Cancelled,
    /// Anything else: network, backend, missing result
    Generic,
}

impl FailureKind {
    /// Classify an error by its message chain
    ///
    /// # Examples
    ///
    /// ```
    /// use novastream::error::{FailureKind, NovastreamError};
    ///
    /// let err: anyhow::Error =
    ///     NovastreamError::Provider("Requested entity was not found.".to_string()).into();
    /// assert_eq!(FailureKind::classify(&err), FailureKind::Credential);
    /// ```
    pub fn classify(error: &anyhow::Error) -> Self {
        if matches!(
            error.downcast_ref::<NovastreamError>(),
            Some(NovastreamError::Cancelled)
        ) {
            return Self::Cancelled;
        }

        if error
            .chain()
            .any(|cause| cause.to_string().contains(CREDENTIAL_ERROR_MARKER))
        {
            Self::Credential
        } else {
            Self::Generic
        }
    }
}
