//! Built-in plain-text engine
//!
//! Last resort when no external renderer is installed. Needs nothing
//! outside the process, so its probe always succeeds. Images, tables and
//! styling are lost; only the text survives.

use std::path::PathBuf;

use finodok_core::{AssembledDocument, RendererOptions};
use tracing::debug;

use crate::compiler::Compiler;
use crate::engine::{ArtifactFormat, ConversionEngine, EngineError, EngineResult};
use crate::text::html_to_text;

/// Engine that typesets the document's text with Typst
#[derive(Debug, Clone, Default)]
pub struct PlainTextEngine {
    font_paths: Vec<PathBuf>,
}

impl PlainTextEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from renderer options
    pub fn from_options(options: &RendererOptions) -> Self {
        Self {
            font_paths: options.font_paths.clone(),
        }
    }

    /// Add a font file to embed
    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_paths.push(path.into());
        self
    }
}

impl ConversionEngine for PlainTextEngine {
    fn name(&self) -> &'static str {
        "typst-plain"
    }

    fn format(&self) -> ArtifactFormat {
        ArtifactFormat::PlainPdf
    }

    fn probe(&self) -> bool {
        true
    }

    fn convert(&self, document: &AssembledDocument, _extra_css: Option<&str>) -> EngineResult<Vec<u8>> {
        let text = html_to_text(document.as_str());
        debug!(chars = text.len(), "typesetting plain text");
        Compiler::compile_text(&text, &self.font_paths)
            .map_err(|e| EngineError::RenderFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_engine_identity() {
        let engine = PlainTextEngine::new();
        assert_eq!(engine.name(), "typst-plain");
        assert_eq!(engine.format(), ArtifactFormat::PlainPdf);
        assert!(engine.probe());
    }

    #[test]
    fn test_plain_engine_converts() {
        let doc = AssembledDocument::from_html(
            "<html><head><style>.x{}</style></head><body><h1>TCS</h1><p>**Risk** low</p></body></html>",
        );
        let bytes = PlainTextEngine::new().convert(&doc, None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.windows(5).any(|w| w == b"/Font"));
    }
}
