//! CLI entry point for the route notes tool.
//!
//! Provides subcommands for tallying the delivery notes of a route export and
//! for splitting a route between the original driver and a helper.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use route_notes::analyzers::analyzer::RouteSession;
use route_notes::analyzers::types::AssignmentRequest;
use route_notes::config::LogConfig;
use route_notes::file_info::read_route_file;
use route_notes::output::{JsonReport, ReportSink, TextReport, write_frequencies_csv};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "route_notes")]
#[command(about = "Tally delivery notes in a route export and split routes between drivers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Count how often each note occurs in a route CSV
    Analyze {
        /// Route export to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format for the report
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the note tally to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// Split a route: the helper takes the last N papers
    Assign {
        /// Route export to read
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Name of the driver who starts the route
        #[arg(short, long)]
        driver: String,

        /// Name of the helper who finishes it
        #[arg(long)]
        helper: String,

        /// Number of papers (stops) the helper takes from the end
        #[arg(short, long)]
        papers: String,

        /// Output format for the result
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_config = LogConfig::from_env();
    let file_appender =
        tracing_appender::rolling::daily(&log_config.directory, &log_config.file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            format,
            export,
        } => {
            let mut sink = sink_for(format);
            analyze(&file, export.as_deref(), sink.as_mut())?;
        }
        Commands::Assign {
            file,
            driver,
            helper,
            papers,
            format,
        } => {
            let request = AssignmentRequest::from_form(&driver, &helper, &papers)?;
            let mut sink = sink_for(format);
            assign(&file, &request, sink.as_mut())?;
        }
    }

    Ok(())
}

fn sink_for(format: Format) -> Box<dyn ReportSink> {
    match format {
        Format::Text => Box::new(TextReport::new(std::io::stdout())),
        Format::Json => Box::new(JsonReport::new(std::io::stdout())),
    }
}

/// Loads a route file, reports its note tally, and optionally exports it.
#[tracing::instrument(skip(file, sink), fields(path = %file.display()))]
fn analyze(file: &Path, export: Option<&Path>, sink: &mut dyn ReportSink) -> Result<()> {
    let (file_info, text) = read_route_file(file)?;

    let mut session = RouteSession::new();
    let analysis = session.load(&text)?;
    sink.analysis(Some(&file_info), analysis)?;

    if let Some(export) = export {
        write_frequencies_csv(export, &analysis.note_frequencies)?;
    }

    Ok(())
}

/// Loads a route file and reports how it splits between driver and helper.
#[tracing::instrument(skip(file, request, sink), fields(path = %file.display()))]
fn assign(file: &Path, request: &AssignmentRequest, sink: &mut dyn ReportSink) -> Result<()> {
    let (_, text) = read_route_file(file)?;

    let mut session = RouteSession::new();
    let total = session.load(&text)?.total_record_count();
    info!(total, papers = request.papers_to_take, "Route loaded for split");

    let result = session.assign(request)?;
    sink.assignment(&result)?;

    Ok(())
}
