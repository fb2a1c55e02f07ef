//! Integration tests for document assembly
//!
//! These exercise the full request -> HTML path through the public API.

use std::io::Write;

use chrono::{TimeZone, Utc};
use finodok_core::template::RISK_NOTICE;
use finodok_core::{DocumentAssembler, MetricMap, ReportRequest, RiskRecord};

fn tcs_request() -> ReportRequest {
    ReportRequest::new("# Report\n\nAll good.", "Overview text.", "TCS")
        .with_exchange("NSE")
        .with_capital(50_000)
        .with_last_close(3500.25)
        .with_risk_summary(vec![])
}

#[test]
fn test_tcs_scenario() {
    let doc = DocumentAssembler::assemble(&tcs_request());
    let html = doc.as_str();

    assert!(html.contains("TCS"));
    assert!(html.contains("NSE"));
    assert!(html.contains("₹50,000"));
    assert!(html.contains("₹3500.25"));
    assert!(html.contains(RISK_NOTICE));
    assert!(html.contains("<h1>Report</h1>"));
    assert!(html.contains("<p>Overview text.</p>"));
}

#[test]
fn test_single_risk_row() {
    let request = tcs_request()
        .with_risk_summary(vec![RiskRecord::new("Market", "Crash", "High", "Hedge")]);
    let doc = DocumentAssembler::assemble(&request);
    let html = doc.as_str();

    assert_eq!(html.matches("<tr><td>").count(), 1);
    assert!(html.contains("<tr><td>Market</td><td>Crash</td><td>High</td><td>Hedge</td></tr>"));
    assert!(!html.contains(RISK_NOTICE));
}

#[test]
fn test_missing_risk_summary_shows_notice() {
    let request = ReportRequest::new("text", "overview", "INFY");
    let doc = DocumentAssembler::assemble(&request);
    assert!(doc.as_str().contains(RISK_NOTICE));
    assert!(!doc.as_str().contains("<table class=\"table\">"));
}

#[test]
fn test_identical_requests_identical_output() {
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let request = tcs_request()
        .with_chart_image(vec![0x89, b'P', b'N', b'G'])
        .with_metric("Strategy", "Swing");

    let first = DocumentAssembler::assemble_at(&request, at);
    let second = DocumentAssembler::assemble_at(&request, at);
    assert_eq!(first, second);
}

#[test]
fn test_output_differs_only_in_timestamp() {
    let request = tcs_request();
    let a = DocumentAssembler::assemble_at(&request, Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 0).unwrap());
    let b = DocumentAssembler::assemble_at(&request, Utc.with_ymd_and_hms(2025, 1, 2, 3, 5, 0).unwrap());

    assert_ne!(a, b);
    assert_eq!(
        a.as_str().replace("03:04 UTC", "03:05 UTC"),
        b.as_str().to_string()
    );
}

#[test]
fn test_extra_metrics_appended_in_order() {
    let extra: MetricMap = vec![("Risk tolerance", "Medium"), ("Strategy", "Swing")]
        .into_iter()
        .collect();
    let request = tcs_request().with_extra_metrics(extra);
    let doc = DocumentAssembler::assemble(&request);
    let html = doc.as_str();

    let last_close = html.find("Last close").unwrap();
    let tolerance = html.find("Risk tolerance").unwrap();
    let strategy = html.find("Strategy").unwrap();
    assert!(last_close < tolerance && tolerance < strategy);
}

#[test]
fn test_logo_slot() {
    let mut logo = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    logo.write_all(b"\x89PNG\r\n\x1a\nrest").unwrap();
    logo.flush().unwrap();

    let with_logo = DocumentAssembler::assemble(&tcs_request().with_logo_path(logo.path()));
    assert!(with_logo.as_str().contains(r#"<img class="logo" src="data:image/png;base64,"#));

    let missing = DocumentAssembler::assemble(&tcs_request().with_logo_path("/nonexistent/logo.png"));
    assert!(!missing.as_str().contains("class=\"logo\" src"));
}

#[test]
fn test_empty_bodies_still_render() {
    let doc = DocumentAssembler::assemble(&ReportRequest::new("", "", "SBIN"));
    assert!(!doc.is_empty());
    assert!(doc.as_str().contains("SBIN"));
}
