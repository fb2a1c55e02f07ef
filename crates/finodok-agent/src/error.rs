//! Error types for agent calls

use thiserror::Error;

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors that can occur when calling the analysis agent
#[derive(Error, Debug)]
pub enum AgentError {
    /// No endpoint configured
    #[error("Agent endpoint is not configured")]
    NotConfigured,

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Agent returned {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Invalid agent response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Unknown risk tolerance label
    #[error("Unknown risk tolerance: {0} (expected Low, Medium or High)")]
    UnknownRiskTolerance(String),
}
