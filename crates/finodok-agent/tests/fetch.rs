//! fetch_report fallback behaviour

use std::net::TcpListener;
use std::sync::Mutex;

use finodok_agent::{
    fetch_report, AgentClient, AgentError, AgentReport, AnalysisRequest, HttpAgentClient, Result,
    EMPTY_REPORT_PLACEHOLDER,
};
use finodok_core::AgentSettings;

struct FakeClient {
    report: Option<AgentReport>,
    seen: Mutex<Vec<String>>,
}

impl FakeClient {
    fn answering(markdown: &str, overview: &str) -> Self {
        Self {
            report: Some(AgentReport {
                markdown_report: markdown.to_string(),
                stock_overview: overview.to_string(),
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            report: None,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl AgentClient for FakeClient {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AgentReport> {
        self.seen.lock().unwrap().push(request.stock_symbol.clone());
        self.report.clone().ok_or(AgentError::ServerError {
            status: 502,
            message: "bad gateway".to_string(),
        })
    }
}

#[test]
fn test_report_passes_through() {
    let client = FakeClient::answering("## Analysis", "TCS builds software.");
    let report = fetch_report(&client, &AnalysisRequest::new("tcs"));

    assert_eq!(report.markdown_report, "## Analysis");
    assert_eq!(report.stock_overview, "TCS builds software.");
    assert_eq!(*client.seen.lock().unwrap(), vec!["TCS".to_string()]);
}

#[test]
fn test_empty_report_gets_placeholder() {
    let client = FakeClient::answering("  \n", "overview");
    let report = fetch_report(&client, &AnalysisRequest::default());

    assert_eq!(report.markdown_report, EMPTY_REPORT_PLACEHOLDER);
    assert_eq!(report.markdown_report, "## No report returned from Agent.\n");
    assert_eq!(report.stock_overview, "overview");
}

#[test]
fn test_failure_becomes_error_markdown() {
    let report = fetch_report(&FakeClient::failing(), &AnalysisRequest::default());

    assert!(report.markdown_report.starts_with("# Error\nAgent API call failed: "));
    assert!(report.markdown_report.contains("502"));
    assert_eq!(report.stock_overview, report.markdown_report);
}

#[test]
fn test_unreachable_endpoint_becomes_error_markdown() {
    // Reserve a port, then free it so nothing is listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let settings = AgentSettings {
        endpoint: Some(format!("http://127.0.0.1:{}/analyze", port)),
        api_key: Some("secret".to_string()),
        timeout_secs: 5,
    };
    let client = HttpAgentClient::new(&settings).unwrap();
    let request = AnalysisRequest::new("INFY");

    assert!(matches!(client.analyze(&request), Err(AgentError::Http(_))));

    let report = fetch_report(&client, &request);
    assert!(report.markdown_report.starts_with("# Error\nAgent API call failed:"));
}
