//! wkhtmltopdf engine
//!
//! Secondary full-fidelity engine using the WebKit-based renderer. Margins
//! are fixed from configuration and local file access is enabled.

use std::ffi::OsString;
use std::path::Path;

use finodok_core::{AssembledDocument, RendererOptions};
use tracing::debug;

use crate::engine::{ConversionEngine, EngineResult};
use crate::process::{binary_responds, run_tool, Scratch};

/// Engine backed by the `wkhtmltopdf` executable
#[derive(Debug, Clone)]
pub struct WkhtmltopdfEngine {
    bin: String,
    margin_mm: u32,
}

impl Default for WkhtmltopdfEngine {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

impl WkhtmltopdfEngine {
    /// Create an engine using the given executable and 10mm margins
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            margin_mm: 10,
        }
    }

    /// Create an engine from renderer options
    pub fn from_options(options: &RendererOptions) -> Self {
        Self {
            bin: options.wkhtmltopdf_bin.clone(),
            margin_mm: options.margin_mm,
        }
    }

    pub fn with_margin_mm(mut self, margin_mm: u32) -> Self {
        self.margin_mm = margin_mm;
        self
    }

    fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let margin = format!("{}mm", self.margin_mm);
        let mut args: Vec<OsString> = vec![
            "--quiet".into(),
            "--enable-local-file-access".into(),
            "--encoding".into(),
            "UTF-8".into(),
        ];
        for side in ["top", "right", "bottom", "left"] {
            args.push(format!("--margin-{}", side).into());
            args.push(margin.as_str().into());
        }
        args.push(input.into());
        args.push(output.into());
        args
    }
}

impl ConversionEngine for WkhtmltopdfEngine {
    fn name(&self) -> &'static str {
        "wkhtmltopdf"
    }

    fn probe(&self) -> bool {
        binary_responds(&self.bin)
    }

    // The document already embeds the stylesheet; wkhtmltopdf ignores the
    // print-only rules an extra stylesheet would re-apply.
    fn convert(&self, document: &AssembledDocument, _extra_css: Option<&str>) -> EngineResult<Vec<u8>> {
        let scratch = Scratch::new()?;
        let input = scratch.write_html(document.as_str())?;
        let output = scratch.output_path();

        debug!(bin = %self.bin, margin_mm = self.margin_mm, "running wkhtmltopdf");
        run_tool(&self.bin, &self.args(&input, &output))?;
        scratch.read_pdf()
    }
}
