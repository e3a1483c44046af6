//! Error type system for the portal client
//!
//! Every workflow operation resolves to either a success value or a
//! `PortalError`. The taxonomy mirrors what the API surface can produce:
//! local validation, authorization gates, transport failures, and business
//! rejections carried in the server's `{success: false, message}` envelope.

use serde::{Deserialize, Serialize};

/// Main error type for the portal client
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    // Local errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // Authorization gates (advisory; the server stays authoritative)
    #[error("Not authenticated: no active session")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("KYC verification required: {0}")]
    VerificationRequired(String),

    // Server-declared outcome
    #[error("Request rejected: {0}")]
    Rejected(String),

    // Transport and decoding
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to decode response (HTTP {status}): {detail}")]
    Decode { status: u16, detail: String },

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PortalError {
    /// Get the error kind name for logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            PortalError::Config(_) => "Config",
            PortalError::Session(_) => "Session",
            PortalError::Validation(_) => "Validation",
            PortalError::NotAuthenticated => "NotAuthenticated",
            PortalError::PermissionDenied(_) => "PermissionDenied",
            PortalError::VerificationRequired(_) => "VerificationRequired",
            PortalError::Rejected(_) => "Rejected",
            PortalError::Network(_) => "Network",
            PortalError::Url(_) => "Url",
            PortalError::Decode { .. } => "Decode",
            PortalError::Io(_) => "Io",
        }
    }

    /// Check if this error is transient.
    ///
    /// The client never retries on its own; this only classifies what a
    /// caller could reasonably re-attempt after a fresh user gesture.
    pub fn is_transient(&self) -> bool {
        matches!(self, PortalError::Network(_))
    }

    /// Build a rejection from an optional server message, falling back to a
    /// generic description when the body carried none.
    pub fn rejected(message: Option<String>, fallback: &str) -> Self {
        PortalError::Rejected(message.unwrap_or_else(|| fallback.to_string()))
    }
}

/// Error report structure for CLI output
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error kind identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorReport {
    pub fn from_error(error: &PortalError) -> Self {
        Self {
            error: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias for operations that can fail with PortalError
pub type Result<T> = std::result::Result<T, PortalError>;
