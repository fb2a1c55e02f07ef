//! Error types for PDF generation

use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// One failed engine attempt, kept for the terminal error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineAttempt {
    /// Engine name
    pub engine: &'static str,
    /// Why it was skipped or failed
    pub reason: String,
}

/// Errors that can occur during PDF generation
#[derive(Error, Debug)]
pub enum PdfError {
    /// Every engine was unavailable or failed
    #[error(
        "No available HTML->PDF engine: install WeasyPrint or wkhtmltopdf{}",
        describe_attempts(.attempts)
    )]
    NoEngineAvailable { attempts: Vec<EngineAttempt> },

    /// Typst compilation error
    #[error("Typst compilation failed: {0}")]
    Compilation(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),
}

fn describe_attempts(attempts: &[EngineAttempt]) -> String {
    if attempts.is_empty() {
        return " (no engines registered)".to_string();
    }
    let parts: Vec<String> = attempts
        .iter()
        .map(|a| format!("{}: {}", a.engine, a.reason))
        .collect();
    format!(" (tried {})", parts.join("; "))
}
