//! WeasyPrint engine
//!
//! Preferred engine: renders the HTML and stylesheet with full CSS paged
//! media support (page size, flex layout, embedded images).

use std::ffi::OsString;
use std::path::Path;

use finodok_core::{AssembledDocument, RendererOptions};
use tracing::debug;

use crate::engine::{ConversionEngine, EngineResult};
use crate::process::{binary_responds, run_tool, Scratch};

/// Engine backed by the `weasyprint` executable
#[derive(Debug, Clone)]
pub struct WeasyPrintEngine {
    bin: String,
    base_url: Option<String>,
}

impl Default for WeasyPrintEngine {
    fn default() -> Self {
        Self::new("weasyprint")
    }
}

impl WeasyPrintEngine {
    /// Create an engine using the given executable
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            base_url: None,
        }
    }

    /// Create an engine from renderer options
    pub fn from_options(options: &RendererOptions) -> Self {
        Self {
            bin: options.weasyprint_bin.clone(),
            base_url: options.base_url.clone(),
        }
    }

    /// Set the base URL for relative links
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn args(&self, input: &Path, output: &Path, stylesheet: Option<&Path>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--encoding".into(), "utf-8".into()];
        if let Some(ref base_url) = self.base_url {
            args.push("--base-url".into());
            args.push(base_url.into());
        }
        if let Some(css) = stylesheet {
            args.push("--stylesheet".into());
            args.push(css.into());
        }
        args.push(input.into());
        args.push(output.into());
        args
    }
}

impl ConversionEngine for WeasyPrintEngine {
    fn name(&self) -> &'static str {
        "weasyprint"
    }

    fn probe(&self) -> bool {
        binary_responds(&self.bin)
    }

    fn convert(&self, document: &AssembledDocument, extra_css: Option<&str>) -> EngineResult<Vec<u8>> {
        let scratch = Scratch::new()?;
        let input = scratch.write_html(document.as_str())?;
        let stylesheet = extra_css.map(|css| scratch.write_css(css)).transpose()?;
        let output = scratch.output_path();

        debug!(bin = %self.bin, "running weasyprint");
        run_tool(&self.bin, &self.args(&input, &output, stylesheet.as_deref()))?;
        scratch.read_pdf()
    }
}
