//! finodok CLI - command-line interface library
//!
//! # Binary Usage
//!
//! ```bash
//! # Render a Markdown report to PDF
//! finodok render --report analysis.md --overview overview.md --symbol TCS \
//!     --capital 50000 --history tcs.csv
//!
//! # Assembled HTML only
//! finodok html --report analysis.md --symbol TCS --output tcs.html
//!
//! # Ask the agent for an analysis, then render it
//! FINODOK_AGENT_ENDPOINT=http://localhost:8000/analyze finodok analyze --symbol TCS
//!
//! # Show which conversion engines work on this host
//! finodok engines
//! ```

pub mod app;

pub use app::{
    analyze_command, build_request, engines_command, html_command, load_config,
    output_file_name, parse_metric, render_command, run_cli, AnalyzeArgs, ReportArgs,
};
