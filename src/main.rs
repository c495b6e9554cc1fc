//! # metainspector CLI Application
//!
//! Command-line entry point for the meta tag inspector.
//!
//! ## Subcommands
//!
//! - `analyze`: fetch one page (or read a saved HTML file) and print the report
//! - `serve`: run the REST API
//! - `dashboard`: interactive terminal dashboard
//!
//! Logging goes to stderr for `analyze` and `serve`, and to a file for the
//! dashboard, which owns the terminal.

mod telemetry;
mod tui;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use metainspector::analyzer::{self, AnalysisResult};
use metainspector::fetcher::{
    fetch_and_analyze, normalize_url, FetcherConfig, PageFetcher, DEFAULT_USER_AGENT,
};
use metainspector::server::{ServerConfig, DEFAULT_BIND};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use telemetry::OtelGuard;
use tracing::instrument;

#[derive(Parser)]
#[command(author, version, about = "Fetch a web page and score its SEO meta tags", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a single page and print the report
    Analyze(AnalyzeArgs),

    /// Serve the REST API
    Serve(ServeArgs),

    /// Open the interactive terminal dashboard
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug, Clone)]
struct FetchArgs {
    /// User agent sent with the page request
    #[arg(long, env = "METAINSPECTOR_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Request timeout in seconds
    #[arg(long, env = "METAINSPECTOR_TIMEOUT_SECS", default_value = "30")]
    timeout: u64,

    /// Maximum number of redirects to follow
    #[arg(long, default_value = "10")]
    max_redirects: usize,
}

impl FetchArgs {
    fn fetcher(&self) -> anyhow::Result<PageFetcher> {
        let config = FetcherConfig::builder()
            .user_agent(self.user_agent.clone())
            .timeout_secs(self.timeout)
            .max_redirects(self.max_redirects)
            .build();
        Ok(PageFetcher::new(config)?)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// URL to analyze (https:// is assumed when no scheme is given)
    #[arg(required = true)]
    url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Analyze a saved HTML file instead of fetching the URL
    #[arg(long)]
    html_file: Option<PathBuf>,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, env = "METAINSPECTOR_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// Maximum request body size in bytes
    #[arg(long, default_value = "16384")]
    max_body_bytes: usize,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    /// URL to analyze on startup
    url: Option<String>,

    #[command(flatten)]
    fetch: FetchArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut _otel: Option<OtelGuard> = None;
    if !matches!(cli.command, Some(Commands::Dashboard(_))) {
        _otel = Some(telemetry::init_tracing_subscriber()?);
    }

    match cli.command {
        Some(Commands::Analyze(args)) => {
            analyze_command(args).await?;
        }
        Some(Commands::Serve(args)) => {
            serve_command(args).await?;
        }
        Some(Commands::Dashboard(args)) => {
            tui::logging::setup_logging()?;
            tui::run(args.fetch.fetcher()?, args.url).await?;
        }
        None => {
            // If no command is provided, show help
            let _ = Cli::parse_from(["metainspector", "--help"]);
        }
    }

    Ok(())
}

#[instrument]
async fn analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let url = normalize_url(&args.url)?;

    let result = match &args.html_file {
        Some(path) => analyze_file(&url, path).await?,
        None => {
            let fetcher = args.fetch.fetcher()?;
            if args.format == OutputFormat::Text {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
                spinner.enable_steady_tick(Duration::from_millis(100));
                spinner.set_message(format!("Fetching {}...", url));
                let result = fetch_and_analyze(&fetcher, &url).await;
                spinner.finish_and_clear();
                result?
            } else {
                fetch_and_analyze(&fetcher, &url).await?
            }
        }
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => metainspector::print_report(&result)?,
    }

    Ok(())
}

async fn analyze_file(url: &str, path: &PathBuf) -> anyhow::Result<AnalysisResult> {
    let html = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(analyzer::analyze(url, &html)?)
}

#[instrument]
async fn serve_command(args: ServeArgs) -> anyhow::Result<()> {
    let config = ServerConfig::builder()
        .bind(args.bind)
        .max_body_bytes(args.max_body_bytes)
        .build();

    metainspector::server::serve(config, args.fetch.fetcher()?).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_analyze_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"<html><head><title>Saved page</title>
            <link rel="canonical" href="https://example.com/saved"></head></html>"#
        )
        .unwrap();

        let path = file.path().to_path_buf();
        let result = analyze_file("https://example.com/saved", &path)
            .await
            .unwrap();

        assert_eq!(result.title.as_deref(), Some("Saved page"));
        assert_eq!(result.canonical.as_deref(), Some("https://example.com/saved"));
    }

    #[tokio::test]
    async fn test_analyze_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.html");
        let err = analyze_file("https://example.com", &path).await.unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::parse_from(["metainspector", "analyze", "example.com", "--format", "json"]);
        match cli.command {
            Some(Commands::Analyze(args)) => {
                assert_eq!(args.url, "example.com");
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.fetch.timeout, 30);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["metainspector", "serve", "--bind", "0.0.0.0:8080"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Serve(ServeArgs { bind, .. })) if bind.port() == 8080
        ));
    }
}
