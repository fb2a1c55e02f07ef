//! finodok-pdf - HTML to PDF conversion
//!
//! Converts an assembled report into a PDF using the first engine that
//! works on this host.
//!
//! # Engines
//!
//! | Engine | Output | Needs |
//! |--------|--------|-------|
//! | `weasyprint` | styled PDF | `weasyprint` on `PATH` |
//! | `wkhtmltopdf` | styled PDF | `wkhtmltopdf` on `PATH` |
//! | `typst-plain` | plain PDF (text only) | feature `typst` (default) |
//!
//! # Example
//!
//! ```no_run
//! use finodok_core::{FinodokConfig, ReportRequest};
//! use finodok_pdf::ReportPipeline;
//!
//! let pipeline = ReportPipeline::new(&FinodokConfig::default());
//! let request = ReportRequest::new("# Report", "Overview", "TCS");
//! let artifact = pipeline.render_report(&request)?;
//! std::fs::write(format!("report.{}", artifact.format.extension()), &artifact.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[cfg(feature = "typst")]
pub mod compiler;
pub mod engine;
pub mod error;
#[cfg(feature = "typst")]
pub mod plain;
pub mod pipeline;
mod process;
pub mod registry;
pub mod text;
pub mod weasyprint;
pub mod wkhtmltopdf;

pub use engine::{ArtifactFormat, ConversionEngine, EngineError, EngineResult, RenderedArtifact};
pub use error::{EngineAttempt, PdfError, Result};
#[cfg(feature = "typst")]
pub use plain::PlainTextEngine;
pub use pipeline::ReportPipeline;
pub use registry::{EngineRegistry, EngineStatus};
pub use text::html_to_text;
pub use weasyprint::WeasyPrintEngine;
pub use wkhtmltopdf::WkhtmltopdfEngine;

use finodok_core::ReportRequest;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render a report with the process-wide default registry
pub fn render_report(request: &ReportRequest) -> Result<RenderedArtifact> {
    ReportPipeline::shared().render_report(request)
}
