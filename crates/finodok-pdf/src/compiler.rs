//! Typst compilation for the plain-text engine
//!
//! Lays out plain text as one paragraph per line on A4 pages and compiles
//! it to PDF bytes using typst-as-lib.

use std::path::PathBuf;

use crate::error::{PdfError, Result};
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_as_lib::TypstEngine;

/// Page setup for plain documents: A4 with ~30pt side margins
const PAGE_SETUP: &str =
    "#set page(paper: \"a4\", margin: (left: 30pt, right: 30pt, top: 30pt, bottom: 18pt))\n\
     #set text(size: 10pt)\n\
     #set par(justify: false)\n\n";

/// Vertical gap emitted for a blank line
const BLANK_LINE_SPACER: &str = "#v(6pt)\n";

/// Compiler for the plain-text engine
pub struct Compiler;

impl Compiler {
    /// Compile plain text to PDF bytes
    pub fn compile_text(text: &str, font_paths: &[PathBuf]) -> Result<Vec<u8>> {
        Self::compile_markup(&plain_markup(text), font_paths)
    }

    /// Compile Typst markup to PDF
    ///
    /// System fonts and the fonts bundled with Typst are always searched;
    /// `font_paths` adds to them.
    pub fn compile_markup(markup: &str, font_paths: &[PathBuf]) -> Result<Vec<u8>> {
        let extra_fonts = read_fonts(font_paths)?;
        let engine = TypstEngine::builder()
            .main_file(markup.to_string())
            .search_fonts_with(TypstKitFontOptions::default())
            .fonts(extra_fonts)
            .build();

        let document = engine
            .compile()
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default())
            .map_err(|e| PdfError::Compilation(format!("PDF generation failed: {:?}", e)))
    }
}

fn read_fonts(font_paths: &[PathBuf]) -> Result<Vec<Vec<u8>>> {
    font_paths
        .iter()
        .map(|path| {
            std::fs::read(path).map_err(|e| {
                PdfError::Font(format!("Failed to read font {}: {}", path.display(), e))
            })
        })
        .collect()
}

/// Build Typst markup: one paragraph per line, a spacer per blank line
pub fn plain_markup(text: &str) -> String {
    let mut markup = String::from(PAGE_SETUP);
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            markup.push_str(BLANK_LINE_SPACER);
        } else {
            markup.push_str(&format!("#\"{}\"\n\n", escape_string(line)));
        }
    }
    markup
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_plain_markup_lines() {
        let markup = plain_markup("Title\n\nBody with \"quotes\" and #hash");
        assert!(markup.starts_with("#set page(paper: \"a4\""));
        assert!(markup.contains("#\"Title\"\n\n"));
        assert!(markup.contains("#v(6pt)\n"));
        assert!(markup.contains("#\"Body with \\\"quotes\\\" and #hash\""));
    }

    #[test]
    fn test_escape_backslash() {
        assert_eq!(escape_string(r"C:\path"), r"C:\\path");
    }

    #[test]
    fn test_compile_text() {
        let result = Compiler::compile_text("Risk Analysis\n\nCapital: \u{20B9}50,000", &[]);
        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
        assert!(result.unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_compile_text_embeds_a_font() {
        let bytes = Compiler::compile_text("Risk Analysis TCS", &[]).unwrap();
        assert!(contains(&bytes, b"/FontFile"), "no embedded font, text would be invisible");
    }

    #[test]
    fn test_missing_font() {
        let result = Compiler::compile_text("x", &[PathBuf::from("/no/such/font.ttf")]);
        assert!(matches!(result, Err(PdfError::Font(_))));
    }
}
