//! finodok-core - report assembly
//!
//! Turns an analysis report (Markdown), a short overview, a handful of
//! metrics and optional image assets into one self-contained, styled HTML
//! document ready for conversion to PDF.
//!
//! # Pipeline
//!
//! 1. **Assets** - images are inlined as `data:` URIs ([`assets`])
//! 2. **Markdown** - report text becomes an HTML fragment ([`markdown`])
//! 3. **Fragments** - metrics panel and risk table ([`fragments`])
//! 4. **Assembler** - everything is substituted into the fixed template
//!    ([`assembler`], [`template`])
//!
//! # Example
//!
//! ```
//! use finodok_core::{DocumentAssembler, ReportRequest};
//!
//! let request = ReportRequest::new("# Report\n\nAll good.", "Overview text.", "tcs")
//!     .with_capital(50_000)
//!     .with_last_close(3500.25);
//!
//! let document = DocumentAssembler::assemble(&request);
//! assert!(document.as_str().contains("TCS"));
//! assert!(document.as_str().contains("₹50,000"));
//! ```

pub mod assembler;
pub mod assets;
pub mod config;
pub mod error;
pub mod fragments;
pub mod markdown;
pub mod request;
pub mod template;

pub use assembler::{AssembledDocument, DocumentAssembler};
pub use assets::{detect_mime, embed_inline, load_and_embed_logo};
pub use config::{AgentSettings, FinodokConfig, RendererOptions, ReportSettings};
pub use error::{CoreError, Result};
pub use fragments::{build_metrics_panel, build_risk_table, format_inr, format_price};
pub use markdown::to_html;
pub use request::{MetricMap, ReportRequest, RiskRecord, DEFAULT_EXCHANGE};
pub use template::STYLESHEET;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
