//! Conversion engine trait and artifact types
//!
//! Each engine adapter turns an assembled HTML document into PDF bytes.
//! The registry tries adapters in priority order and falls back on failure.

use finodok_core::AssembledDocument;

/// Errors raised by a single engine attempt
///
/// These never reach the caller on their own; the registry logs them and
/// moves on to the next engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine's runtime dependency is missing
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// The engine ran but failed to produce a document
    #[error("Rendering failed: {0}")]
    RenderFailed(String),

    /// I/O error while staging input or reading output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Kind of document an engine produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFormat {
    /// Paginated PDF with the full stylesheet applied
    StyledPdf,
    /// Paginated PDF of plain paragraphs, no images or styling
    PlainPdf,
}

impl ArtifactFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        "pdf"
    }

    /// MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    /// Whether the full visual styling survived
    pub fn is_full_fidelity(&self) -> bool {
        matches!(self, Self::StyledPdf)
    }
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StyledPdf => write!(f, "styled PDF"),
            Self::PlainPdf => write!(f, "plain PDF"),
        }
    }
}

/// Trait for HTML -> PDF conversion engines
///
/// `probe` must be free of side effects; the registry calls it exactly once
/// per engine and caches the answer.
pub trait ConversionEngine: Send + Sync {
    /// Short engine name used in logs and errors
    fn name(&self) -> &'static str;

    /// Kind of artifact this engine produces
    fn format(&self) -> ArtifactFormat {
        ArtifactFormat::StyledPdf
    }

    /// Whether the engine can run in this process
    fn probe(&self) -> bool;

    /// Convert the document, applying `extra_css` where supported
    fn convert(&self, document: &AssembledDocument, extra_css: Option<&str>) -> EngineResult<Vec<u8>>;
}

/// Final binary output of a render
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    /// Document bytes
    pub bytes: Vec<u8>,
    /// What kind of document the bytes hold
    pub format: ArtifactFormat,
    /// Name of the engine that produced it
    pub engine: &'static str,
}

impl RenderedArtifact {
    pub fn new(bytes: Vec<u8>, format: ArtifactFormat, engine: &'static str) -> Self {
        Self {
            bytes,
            format,
            engine,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check if the bytes carry a PDF header
    pub fn is_pdf(&self) -> bool {
        self.bytes.starts_with(b"%PDF")
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_format() {
        assert_eq!(ArtifactFormat::StyledPdf.extension(), "pdf");
        assert_eq!(ArtifactFormat::PlainPdf.mime_type(), "application/pdf");
        assert!(ArtifactFormat::StyledPdf.is_full_fidelity());
        assert!(!ArtifactFormat::PlainPdf.is_full_fidelity());
    }

    #[test]
    fn test_rendered_artifact() {
        let artifact = RenderedArtifact::new(b"%PDF-1.7".to_vec(), ArtifactFormat::PlainPdf, "test");
        assert!(artifact.is_pdf());
        assert_eq!(artifact.len(), 8);
        assert_eq!(artifact.engine, "test");

        let other = RenderedArtifact::new(b"nope".to_vec(), ArtifactFormat::StyledPdf, "test");
        assert!(!other.is_pdf());
    }
}
