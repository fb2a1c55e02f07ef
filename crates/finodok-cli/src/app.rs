//! CLI application logic

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use finodok_agent::{fetch_report, AnalysisRequest, HttpAgentClient, RiskTolerance};
use finodok_core::{DocumentAssembler, FinodokConfig, MetricMap, ReportRequest, RiskRecord};
use finodok_data::{exchange_symbol, ChartRenderer, PriceHistory};
use finodok_pdf::{PdfError, ReportPipeline};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "finodok.toml";

#[derive(Parser)]
#[command(name = "finodok")]
#[command(author, version, about = "Financial analysis reports to PDF", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Markdown report to PDF
    Render {
        #[command(flatten)]
        report: ReportArgs,

        /// Also write the Markdown report next to the PDF
        #[arg(long)]
        also_markdown: bool,
    },

    /// Write the assembled HTML document without converting it
    Html {
        #[command(flatten)]
        report: ReportArgs,
    },

    /// Request an analysis from the agent, then render it
    Analyze(AnalyzeArgs),

    /// List conversion engines and whether they work on this host
    Engines,
}

/// Inputs shared by `render` and `html`
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Markdown report file
    #[arg(long)]
    pub report: PathBuf,

    /// Markdown overview file
    #[arg(long)]
    pub overview: Option<PathBuf>,

    /// Ticker symbol
    #[arg(short, long)]
    pub symbol: String,

    /// Exchange (defaults to the configured exchange)
    #[arg(long)]
    pub exchange: Option<String>,

    /// Investment capital in rupees
    #[arg(long)]
    pub capital: Option<i64>,

    /// Last closing price (derived from --history when omitted)
    #[arg(long)]
    pub last_close: Option<f64>,

    /// CSV price history with Date and Close columns
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// PNG chart to embed (drawn from --history when omitted)
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Logo image (defaults to the configured logo)
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Extra metric, repeatable
    #[arg(long = "metric", value_name = "LABEL=VALUE", value_parser = parse_metric)]
    pub metrics: Vec<(String, String)>,

    /// JSON file with risk summary rows
    #[arg(long)]
    pub risk: Option<PathBuf>,

    /// Output file (defaults to SYMBOL_YYYYMMDD_HHMM.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Inputs for `analyze`
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Ticker symbol
    #[arg(short, long)]
    pub symbol: String,

    /// Exchange (defaults to the configured exchange)
    #[arg(long)]
    pub exchange: Option<String>,

    /// Investment capital in rupees
    #[arg(long, default_value_t = 10_000)]
    pub capital: i64,

    /// Low, Medium or High
    #[arg(long, default_value = "Medium", value_parser = parse_risk_tolerance)]
    pub risk_tolerance: RiskTolerance,

    /// Trading strategy preference
    #[arg(long, default_value = "Swing Trading")]
    pub strategy: String,

    /// Ignore news flow in the analysis
    #[arg(long)]
    pub no_news_impact: bool,

    /// CSV price history with Date and Close columns
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Logo image (defaults to the configured logo)
    #[arg(long)]
    pub logo: Option<PathBuf>,

    /// Directory for the Markdown and PDF outputs
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Run the CLI application
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            report,
            also_markdown,
        } => {
            render_command(&report, also_markdown, &config)?;
        }
        Commands::Html { report } => {
            html_command(&report, &config)?;
        }
        Commands::Analyze(args) => {
            analyze_command(&args, &config)?;
        }
        Commands::Engines => {
            engines_command(&config)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` adds directives
fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load configuration and apply environment overrides
///
/// An explicit path must exist; otherwise `finodok.toml` in the working
/// directory is used when present, else defaults.
pub fn load_config(path: Option<&Path>) -> Result<FinodokConfig> {
    let config = match path {
        Some(path) => FinodokConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            FinodokConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("Failed to load config: {}", DEFAULT_CONFIG_FILE))?
        }
        None => FinodokConfig::default(),
    };
    Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
}

/// Default output file name: `{symbol}_{yyyyMMdd_HHmm}.{ext}` in UTC
pub fn output_file_name(symbol: &str, ext: &str, time: DateTime<Utc>) -> String {
    format!("{}_{}.{}", symbol, time.format("%Y%m%d_%H%M"), ext)
}

/// Parse a `LABEL=VALUE` metric argument
pub fn parse_metric(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((label, value)) if !label.trim().is_empty() => {
            Ok((label.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected LABEL=VALUE, got '{}'", raw)),
    }
}

fn parse_risk_tolerance(raw: &str) -> std::result::Result<RiskTolerance, String> {
    raw.parse().map_err(|e: finodok_agent::AgentError| e.to_string())
}

/// Build a report request from command-line inputs
pub fn build_request(args: &ReportArgs, config: &FinodokConfig) -> Result<ReportRequest> {
    let markdown = fs::read_to_string(&args.report)
        .with_context(|| format!("Failed to read report: {}", args.report.display()))?;
    let overview = match args.overview {
        Some(ref path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read overview: {}", path.display()))?,
        None => String::new(),
    };

    let exchange = args
        .exchange
        .clone()
        .unwrap_or_else(|| config.report.exchange.clone());
    let mut request = ReportRequest::new(markdown, overview, &args.symbol).with_exchange(exchange);

    let history = match args.history {
        Some(ref path) => Some(
            PriceHistory::from_csv_path(path)
                .with_context(|| format!("Failed to load price history: {}", path.display()))?,
        ),
        None => None,
    };

    if let Some(capital) = args.capital {
        request = request.with_capital(capital);
    }
    if let Some(last_close) = args
        .last_close
        .or_else(|| history.as_ref().and_then(PriceHistory::last_close))
    {
        request = request.with_last_close(last_close);
    }

    if let Some(ref path) = args.chart {
        let png = fs::read(path)
            .with_context(|| format!("Failed to read chart: {}", path.display()))?;
        request = request.with_chart_image(png);
    } else if let Some(ref history) = history {
        if let Some(png) = draw_chart(history, &request.symbol) {
            request = request.with_chart_image(png);
        }
    }

    if let Some(logo) = args.logo.clone().or_else(|| config.report.logo_path.clone()) {
        request = request.with_logo_path(logo);
    }

    if !args.metrics.is_empty() {
        let metrics: MetricMap = args.metrics.iter().cloned().collect();
        request = request.with_extra_metrics(metrics);
    }

    if let Some(ref path) = args.risk {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read risk summary: {}", path.display()))?;
        let rows: Vec<RiskRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid risk summary JSON: {}", path.display()))?;
        request = request.with_risk_summary(rows);
    }

    Ok(request)
}

fn draw_chart(history: &PriceHistory, symbol: &str) -> Option<Vec<u8>> {
    match ChartRenderer::new().render_png(history, &format!("{} - Close", symbol)) {
        Ok(png) => Some(png),
        Err(e) => {
            warn!(error = %e, "chart not rendered, continuing without it");
            None
        }
    }
}

/// Execute the render command, returning the written PDF path
pub fn render_command(args: &ReportArgs, also_markdown: bool, config: &FinodokConfig) -> Result<PathBuf> {
    println!("finodok v{}", finodok_core::VERSION);
    println!("Rendering: {}", args.report.display());

    let request = build_request(args, config)?;
    let pipeline = ReportPipeline::new(config);
    let artifact = pipeline
        .render_report(&request)
        .context("Failed to render report")?;

    let output_path = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(output_file_name(
            &request.symbol,
            artifact.format.extension(),
            Utc::now(),
        ))
    });
    fs::write(&output_path, &artifact.bytes)
        .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
    println!("  Engine: {} ({})", artifact.engine, artifact.format);
    println!("  Created: {}", output_path.display());

    if !artifact.format.is_full_fidelity() {
        println!("  Note: styled rendering unavailable, wrote a plain-text PDF");
    }

    if also_markdown {
        let md_path = output_path.with_extension("md");
        fs::write(&md_path, &request.markdown_body)
            .with_context(|| format!("Failed to write Markdown: {}", md_path.display()))?;
        println!("  Created: {}", md_path.display());
    }

    Ok(output_path)
}

/// Execute the html command, returning the written HTML path
pub fn html_command(args: &ReportArgs, config: &FinodokConfig) -> Result<PathBuf> {
    let request = build_request(args, config)?;
    let document = DocumentAssembler::assemble(&request);

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(output_file_name(&request.symbol, "html", Utc::now())));
    fs::write(&output_path, document.as_str())
        .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
    println!("Created: {}", output_path.display());

    Ok(output_path)
}

/// Execute the analyze command
///
/// The Markdown report is always written. When no conversion engine works
/// the PDF is skipped with a warning instead of failing the command.
pub fn analyze_command(args: &AnalyzeArgs, config: &FinodokConfig) -> Result<()> {
    println!("finodok v{}", finodok_core::VERSION);

    let exchange = args
        .exchange
        .clone()
        .unwrap_or_else(|| config.report.exchange.clone());
    let symbol = args.symbol.trim().to_uppercase();
    println!("Analyzing: {}", exchange_symbol(&symbol, &exchange));

    let history = match args.history {
        Some(ref path) => Some(
            PriceHistory::from_csv_path(path)
                .with_context(|| format!("Failed to load price history: {}", path.display()))?,
        ),
        None => None,
    };

    let mut analysis = AnalysisRequest::new(&symbol)
        .with_exchange(exchange.clone())
        .with_capital(args.capital)
        .with_risk_tolerance(args.risk_tolerance)
        .with_strategy(args.strategy.clone())
        .with_news_impact(!args.no_news_impact);
    if let Some(ref history) = history {
        analysis = analysis.with_price_summary(history.summary());
    }

    let client = HttpAgentClient::new(&config.agent).context(
        "Agent client unavailable: set agent.endpoint in finodok.toml or FINODOK_AGENT_ENDPOINT",
    )?;
    let report = fetch_report(&client, &analysis);

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", args.output_dir.display())
    })?;
    let now = Utc::now();

    let md_path = args.output_dir.join(output_file_name(&symbol, "md", now));
    fs::write(&md_path, &report.markdown_report)
        .with_context(|| format!("Failed to write Markdown: {}", md_path.display()))?;
    println!("  Created: {}", md_path.display());

    let mut request = ReportRequest::new(&report.markdown_report, &report.stock_overview, &symbol)
        .with_exchange(exchange)
        .with_capital(args.capital);
    if let Some(ref history) = history {
        if let Some(last_close) = history.last_close() {
            request = request.with_last_close(last_close);
        }
        if let Some(png) = draw_chart(history, &symbol) {
            request = request.with_chart_image(png);
        }
    }
    if let Some(logo) = args.logo.clone().or_else(|| config.report.logo_path.clone()) {
        request = request.with_logo_path(logo);
    }

    match ReportPipeline::new(config).render_report(&request) {
        Ok(artifact) => {
            let pdf_path = args
                .output_dir
                .join(output_file_name(&symbol, artifact.format.extension(), now));
            fs::write(&pdf_path, &artifact.bytes)
                .with_context(|| format!("Failed to write PDF: {}", pdf_path.display()))?;
            println!("  Engine: {} ({})", artifact.engine, artifact.format);
            println!("  Created: {}", pdf_path.display());
        }
        Err(e @ PdfError::NoEngineAvailable { .. }) => {
            eprintln!("PDF not generated: {}", e);
            eprintln!("The Markdown report is available at {}", md_path.display());
        }
        Err(e) => return Err(e).context("Failed to render report"),
    }

    Ok(())
}

/// Execute the engines command
pub fn engines_command(config: &FinodokConfig) -> Result<()> {
    let pipeline = ReportPipeline::new(config);
    let status = pipeline.registry().status();

    if status.is_empty() {
        println!("No conversion engines registered");
        return Ok(());
    }

    println!("Conversion engines (priority order):");
    for (i, engine) in status.iter().enumerate() {
        println!(
            "  {}. {:<12} {:<11} {}",
            i + 1,
            engine.name,
            engine.format.to_string(),
            if engine.available { "available" } else { "not available" }
        );
    }
    if !pipeline.registry().has_available() {
        println!();
        println!("No engine is usable: install WeasyPrint or wkhtmltopdf");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_output_file_name() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(output_file_name("TCS", "pdf", at), "TCS_20250307_0905.pdf");
        assert_eq!(output_file_name("INFY", "md", at), "INFY_20250307_0905.md");
    }

    #[test]
    fn test_parse_metric() {
        assert_eq!(
            parse_metric("Strategy=Swing Trading").unwrap(),
            ("Strategy".to_string(), "Swing Trading".to_string())
        );
        assert_eq!(
            parse_metric("Ratio=a=b").unwrap(),
            ("Ratio".to_string(), "a=b".to_string())
        );
        assert!(parse_metric("novalue").is_err());
        assert!(parse_metric("=x").is_err());
    }

    #[test]
    fn test_parse_risk_tolerance() {
        assert_eq!(parse_risk_tolerance("high").unwrap(), RiskTolerance::High);
        assert!(parse_risk_tolerance("wild").is_err());
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "finodok",
            "render",
            "--report",
            "r.md",
            "--symbol",
            "tcs",
            "--metric",
            "Beta=1.1",
            "--metric",
            "PE=30",
            "--also-markdown",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Render {
                report,
                also_markdown,
            } => {
                assert_eq!(report.symbol, "tcs");
                assert_eq!(report.metrics.len(), 2);
                assert!(also_markdown);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_cli_parses_analyze_defaults() {
        let cli = Cli::try_parse_from(["finodok", "analyze", "--symbol", "TCS"]).unwrap();
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.capital, 10_000);
                assert_eq!(args.risk_tolerance, RiskTolerance::Medium);
                assert_eq!(args.strategy, "Swing Trading");
                assert!(!args.no_news_impact);
            }
            _ => panic!("expected analyze"),
        }
    }
}
