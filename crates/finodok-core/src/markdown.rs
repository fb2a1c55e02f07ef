//! Markdown to HTML conversion
//!
//! Tables, footnotes and heading attributes are enabled on top of
//! CommonMark. Ordered lists keep their start number and adjacent lists of
//! different types stay separate.

use pulldown_cmark::{html, Options, Parser};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Convert Markdown to an HTML fragment
///
/// Output is deterministic; blank input yields an empty string. Raw HTML in
/// the source is passed through unchanged.
pub fn to_html(markdown: &str) -> String {
    if markdown.trim().is_empty() {
        return String::new();
    }

    let parser = Parser::new_ext(markdown, options());
    let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html(""), "");
        assert_eq!(to_html("   \n\n"), "");
    }

    #[test]
    fn test_heading_and_paragraph() {
        let html = to_html("# Report\n\nAll good.");
        assert_eq!(html, "<h1>Report</h1>\n<p>All good.</p>\n");
    }

    #[test]
    fn test_emphasis() {
        let html = to_html("This is **bold** and *italic*.");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_lists() {
        let html = to_html("- one\n- two\n\n3. three\n4. four\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<ol start=\"3\">"));
        assert!(html.contains("<li>four</li>"));
    }

    #[test]
    fn test_pipe_table() {
        let md = "| Area | Risk |\n|------|------|\n| Market | High |\n";
        let html = to_html(md);
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>Area</th>"));
        assert!(html.contains("<td>Market</td>"));
        assert!(html.contains("<td>High</td>"));
    }

    #[test]
    fn test_deterministic() {
        let md = "## Title\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\n1. x\n2. y\n";
        assert_eq!(to_html(md), to_html(md));
    }
}
