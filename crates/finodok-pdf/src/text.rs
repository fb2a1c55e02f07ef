//! HTML to plain text reduction for the degraded engine

use std::sync::OnceLock;

use regex::Regex;

static DROPPED_BLOCKS: OnceLock<Regex> = OnceLock::new();
static INLINE_TAGS: OnceLock<Regex> = OnceLock::new();
static ANY_TAG: OnceLock<Regex> = OnceLock::new();
static NUMERIC_ENTITY: OnceLock<Regex> = OnceLock::new();

fn dropped_blocks() -> &'static Regex {
    DROPPED_BLOCKS.get_or_init(|| {
        Regex::new(r"(?is)<head\b.*?</head>|<style\b.*?</style>|<script\b.*?</script>|<!--.*?-->")
            .expect("valid regex")
    })
}

fn inline_tags() -> &'static Regex {
    INLINE_TAGS.get_or_init(|| {
        Regex::new(r"(?i)</?(?:strong|em|b|i|a|code|span|sup|sub|del|small)\b[^>]*>")
            .expect("valid regex")
    })
}

fn any_tag() -> &'static Regex {
    ANY_TAG.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"))
}

fn numeric_entity() -> &'static Regex {
    NUMERIC_ENTITY.get_or_init(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid regex"))
}

/// Reduce an HTML document to newline-separated text
///
/// Head, style and script content is dropped. Inline markup disappears
/// without a break; every other tag becomes a line break. Entities are
/// decoded, Markdown bold markers removed, and runs of blank lines
/// collapsed to one.
pub fn html_to_text(html: &str) -> String {
    let text = dropped_blocks().replace_all(html, "");
    let text = inline_tags().replace_all(&text, "");
    let text = any_tag().replace_all(&text, "\n");
    let text = decode_entities(&text).replace("**", "");

    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() && lines.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn decode_entities(text: &str) -> String {
    let text = numeric_entity().replace_all(text, |caps: &regex::Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    text.replace("&nbsp;", " ")
        .replace("&middot;", "\u{00B7}")
        .replace("&mdash;", "\u{2014}")
        .replace("&ndash;", "\u{2013}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_become_lines() {
        let html = "<h1>Title</h1><p>First <strong>bold</strong> line</p><p>Second</p>";
        assert_eq!(html_to_text(html), "Title\n\nFirst bold line\n\nSecond");
    }

    #[test]
    fn test_head_and_style_dropped() {
        let html = "<html><head><title>T</title><style>body { color: red; }</style></head>\
                    <body><p>Body</p><script>alert(1)</script></body></html>";
        assert_eq!(html_to_text(html), "Body");
    }

    #[test]
    fn test_entities_decoded() {
        let html = "<p>A &amp; B &lt;ok&gt; &#8377;5 &#x20B9;6 TCS &middot; NSE</p>";
        assert_eq!(html_to_text(html), "A & B <ok> \u{20B9}5 \u{20B9}6 TCS \u{00B7} NSE");
    }

    #[test]
    fn test_bold_markers_removed() {
        assert_eq!(html_to_text("<p>**Risk** high</p>"), "Risk high");
    }

    #[test]
    fn test_blank_runs_collapse() {
        let html = "<div>\n\n<p>One</p>\n\n\n<div></div><p>Two</p>\n</div>";
        assert_eq!(html_to_text(html), "One\n\nTwo");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("<div></div>"), "");
    }
}
