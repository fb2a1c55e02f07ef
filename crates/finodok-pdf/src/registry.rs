//! Engine selection with fallback chain
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     EngineRegistry                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Priority Order:                                             │
//! │  1. WeasyPrintEngine - full CSS, styled PDF                  │
//! │  2. WkhtmltopdfEngine - WebKit, styled PDF                   │
//! │  3. PlainTextEngine (typst) - text only, plain PDF           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Availability is probed once, when the registry is built. A render walks
//! the available engines in order; a failure is logged and the next engine
//! is tried. The caller only sees an error when every engine is exhausted.

use std::sync::OnceLock;

use finodok_core::{AssembledDocument, RendererOptions};
use tracing::{debug, info, warn};

use crate::engine::{ArtifactFormat, ConversionEngine, RenderedArtifact};
use crate::error::{EngineAttempt, PdfError, Result};
use crate::weasyprint::WeasyPrintEngine;
use crate::wkhtmltopdf::WkhtmltopdfEngine;

static SHARED: OnceLock<EngineRegistry> = OnceLock::new();

/// A registered engine and its cached probe result
struct Slot {
    engine: Box<dyn ConversionEngine>,
    available: bool,
}

/// Snapshot of one engine's registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineStatus {
    pub name: &'static str,
    pub format: ArtifactFormat,
    pub available: bool,
}

/// Ordered set of conversion engines with cached availability
pub struct EngineRegistry {
    slots: Vec<Slot>,
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::with_defaults(&RendererOptions::default())
    }
}

impl EngineRegistry {
    /// Create a registry with the standard engines
    ///
    /// Engines listed in `options.disabled_engines` are left out. The
    /// plain-text engine is only present with the `typst` feature.
    pub fn with_defaults(options: &RendererOptions) -> Self {
        let mut engines: Vec<Box<dyn ConversionEngine>> = Vec::new();

        engines.push(Box::new(WeasyPrintEngine::from_options(options)));
        engines.push(Box::new(WkhtmltopdfEngine::from_options(options)));

        #[cfg(feature = "typst")]
        engines.push(Box::new(crate::plain::PlainTextEngine::from_options(options)));

        engines.retain(|engine| {
            let disabled = options.is_disabled(engine.name());
            if disabled {
                debug!(engine = engine.name(), "engine disabled by configuration");
            }
            !disabled
        });

        Self::from_engines(engines)
    }

    /// Create a registry from engines in priority order, probing each once
    pub fn from_engines(engines: Vec<Box<dyn ConversionEngine>>) -> Self {
        let slots = engines
            .into_iter()
            .map(|engine| {
                let available = engine.probe();
                debug!(engine = engine.name(), available, "probed conversion engine");
                Slot { engine, available }
            })
            .collect();
        Self { slots }
    }

    /// Create a registry with no engines (for testing)
    pub fn empty() -> Self {
        Self { slots: Vec::new() }
    }

    /// Process-wide registry with default options, probed on first use
    pub fn shared() -> &'static EngineRegistry {
        SHARED.get_or_init(EngineRegistry::default)
    }

    /// Registration and availability of each engine, in priority order
    pub fn status(&self) -> Vec<EngineStatus> {
        self.slots
            .iter()
            .map(|slot| EngineStatus {
                name: slot.engine.name(),
                format: slot.engine.format(),
                available: slot.available,
            })
            .collect()
    }

    /// Names of all registered engines
    pub fn engine_names(&self) -> Vec<&'static str> {
        self.slots.iter().map(|slot| slot.engine.name()).collect()
    }

    /// Check whether any engine passed its probe
    pub fn has_available(&self) -> bool {
        self.slots.iter().any(|slot| slot.available)
    }

    /// Convert a document with the first engine that succeeds
    pub fn render(
        &self,
        document: &AssembledDocument,
        extra_css: Option<&str>,
    ) -> Result<RenderedArtifact> {
        let mut attempts = Vec::with_capacity(self.slots.len());

        for slot in &self.slots {
            let name = slot.engine.name();
            if !slot.available {
                debug!(engine = name, "engine not available, skipping");
                attempts.push(EngineAttempt {
                    engine: name,
                    reason: "not available".to_string(),
                });
                continue;
            }

            match slot.engine.convert(document, extra_css) {
                Ok(bytes) if bytes.is_empty() => {
                    warn!(engine = name, "engine produced no output");
                    attempts.push(EngineAttempt {
                        engine: name,
                        reason: "empty output".to_string(),
                    });
                }
                Ok(bytes) => {
                    let format = slot.engine.format();
                    info!(engine = name, %format, bytes = bytes.len(), "rendered report");
                    return Ok(RenderedArtifact::new(bytes, format, name));
                }
                Err(e) => {
                    warn!(engine = name, error = %e, "engine failed, trying next");
                    attempts.push(EngineAttempt {
                        engine: name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(PdfError::NoEngineAvailable { attempts })
    }
}
