//! End-to-end report rendering
//!
//! Assembles a request into HTML, then converts it through the engine
//! registry, passing the embedded stylesheet along so engines that support
//! an extra stylesheet can reapply the print rules.

use finodok_core::{AssembledDocument, DocumentAssembler, FinodokConfig, ReportRequest, STYLESHEET};
use tracing::debug;

use crate::engine::RenderedArtifact;
use crate::error::Result;
use crate::registry::EngineRegistry;

enum RegistryHandle {
    Owned(EngineRegistry),
    Shared(&'static EngineRegistry),
}

/// Facade composing assembly and conversion
pub struct ReportPipeline {
    registry: RegistryHandle,
}

impl Default for ReportPipeline {
    fn default() -> Self {
        Self::shared()
    }
}

impl ReportPipeline {
    /// Build a pipeline whose registry follows the renderer configuration
    pub fn new(config: &FinodokConfig) -> Self {
        Self::with_registry(EngineRegistry::with_defaults(&config.renderer))
    }

    /// Build a pipeline around an existing registry
    pub fn with_registry(registry: EngineRegistry) -> Self {
        Self {
            registry: RegistryHandle::Owned(registry),
        }
    }

    /// Build a pipeline on the process-wide default registry
    pub fn shared() -> Self {
        Self {
            registry: RegistryHandle::Shared(EngineRegistry::shared()),
        }
    }

    pub fn registry(&self) -> &EngineRegistry {
        match &self.registry {
            RegistryHandle::Owned(registry) => registry,
            RegistryHandle::Shared(registry) => registry,
        }
    }

    /// Assemble the HTML document without converting it
    pub fn assemble(&self, request: &ReportRequest) -> AssembledDocument {
        DocumentAssembler::assemble(request)
    }

    /// Assemble and convert a report to its final artifact
    pub fn render_report(&self, request: &ReportRequest) -> Result<RenderedArtifact> {
        let document = self.assemble(request);
        debug!(symbol = %request.symbol, html_bytes = document.len(), "assembled report");
        self.registry().render(&document, Some(STYLESHEET))
    }
}
