//! Fixed document template and embedded stylesheet

/// Stylesheet embedded in every report and re-applied at conversion time
pub const STYLESHEET: &str = r#"
@page { size: A4; margin: 28mm 20mm 20mm 20mm; }
body {
  font-family: "Inter", "Arial", sans-serif;
  color: #111;
  background: #fff;
  line-height: 1.45;
  font-size: 12px;
}
.header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  border-bottom: 1px solid #e6e6e6;
  padding-bottom: 10px;
  margin-bottom: 10px;
}
.brand { display: flex; align-items: center; }
.logo { width: 64px; height: 64px; object-fit: contain; margin-right: 12px; }
.title { font-size: 18px; font-weight: 700; }
.subtitle { font-size: 12px; color: #444; }
.meta { text-align: right; font-size: 11px; color: #555; }
.section { margin-top: 14px; margin-bottom: 8px; }
.h2 { font-size: 13px; font-weight: 700; margin-bottom: 6px; color: #222; }
.card {
  border: 1px solid #eaeaea;
  padding: 10px;
  border-radius: 6px;
  background: #fbfbfb;
}
.key-metrics { display: flex; gap: 12px; margin-top: 8px; flex-wrap: wrap; }
.metric {
  background: #fff;
  padding: 8px 10px;
  border-radius: 6px;
  border: 1px solid #eee;
  min-width: 110px;
  text-align: center;
}
.metric-label { font-weight: 700; }
.metric-value { margin-top: 4px; }
.chart { margin-top: 10px; text-align: center; }
.chart img { max-width: 100%; height: auto; border: 1px solid #eee; border-radius: 6px; }
.table { width: 100%; border-collapse: collapse; margin-top: 8px; }
.table th, .table td { border: 1px solid #ddd; padding: 8px; font-size: 12px; }
.table th { background: #f5f7fa; text-align: left; }
.content table { width: 100%; border-collapse: collapse; }
.content th, .content td { border: 1px solid #ddd; padding: 6px; }
.footer {
  margin-top: 18px;
  font-size: 10px;
  color: #666;
  border-top: 1px solid #eee;
  padding-top: 8px;
  text-align: right;
}
.page-break { page-break-after: always; }
"#;

/// Report title shown in the header
pub const REPORT_TITLE: &str = "Comprehensive Risk Analysis Report";

/// Notice shown in place of an empty risk table
pub const RISK_NOTICE: &str = "<div class=\"card\">See detailed analysis above.</div>";

/// Pre-rendered blocks substituted into the template
#[derive(Debug, Clone, Default)]
pub struct TemplateSlots<'a> {
    pub logo_html: &'a str,
    pub subtitle: &'a str,
    pub symbol: &'a str,
    pub exchange: &'a str,
    pub as_of: &'a str,
    pub as_of_long: &'a str,
    pub overview_html: &'a str,
    pub key_metrics_html: &'a str,
    pub chart_html: &'a str,
    pub content_html: &'a str,
    pub risk_html: &'a str,
}

/// Substitute all blocks into the fixed template
pub fn render(slots: &TemplateSlots<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{symbol} - {title}</title>
    <style>{css}</style>
  </head>
  <body>
    <div class="header">
      <div class="brand">
        {logo_html}
        <div>
          <div class="title">{title}</div>
          <div class="subtitle">{subtitle}</div>
        </div>
      </div>
      <div class="meta">
        <div><strong>{symbol}</strong> &middot; {exchange}</div>
        <div>{as_of}</div>
      </div>
    </div>

    <div class="section">
      <div class="h2">Overview</div>
      <div class="card">
        {overview_html}
      </div>
    </div>

    <div class="section">
      <div class="h2">Key Metrics</div>
      <div class="card key-metrics">
        {key_metrics_html}
      </div>
    </div>

    <div class="section chart">
      {chart_html}
    </div>

    <div class="section content">
      <div class="h2">Detailed Analysis</div>
      {content_html}
    </div>

    <div class="section">
      <div class="h2">Risk Summary Table</div>
      {risk_html}
    </div>

    <div class="footer">
      Generated on {as_of_long} &nbsp;|&nbsp; Financial Analyst App
    </div>
  </body>
</html>
"#,
        css = STYLESHEET,
        title = REPORT_TITLE,
        logo_html = slots.logo_html,
        subtitle = slots.subtitle,
        symbol = slots.symbol,
        exchange = slots.exchange,
        as_of = slots.as_of,
        as_of_long = slots.as_of_long,
        overview_html = slots.overview_html,
        key_metrics_html = slots.key_metrics_html,
        chart_html = slots.chart_html,
        content_html = slots.content_html,
        risk_html = slots.risk_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_page_rules() {
        assert!(STYLESHEET.contains("@page { size: A4;"));
        assert!(STYLESHEET.contains(".page-break"));
        assert!(STYLESHEET.contains(".metric"));
    }

    #[test]
    fn test_render_empty_slots() {
        let html = render(&TemplateSlots::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(REPORT_TITLE));
        assert!(html.contains("Risk Summary Table"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_render_places_blocks() {
        let slots = TemplateSlots {
            symbol: "TCS",
            exchange: "NSE",
            content_html: "<p>body</p>",
            risk_html: RISK_NOTICE,
            ..Default::default()
        };
        let html = render(&slots);
        assert!(html.contains("<strong>TCS</strong> &middot; NSE"));
        assert!(html.find("<p>body</p>").unwrap() < html.find(RISK_NOTICE).unwrap());
    }
}
