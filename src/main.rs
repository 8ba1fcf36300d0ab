use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use requisition::{ConformanceReport, WireFormat};
use requisition_core::constants::{CONFORMANCE_ENV_VAR, FORMAT_ENV_VAR};
use requisition_core::{
    CoreConfig, RequisitionService, conformance_mode_from_env_value, wire_format_from_env_value,
};

#[derive(Parser)]
#[command(name = "requisition")]
#[command(about = "Equipment and supplies requisition payload tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a requisition request and report conformance findings
    CheckRequest {
        /// Path to the request payload
        path: PathBuf,
        /// Wire format (json or yaml); defaults to the file extension
        #[arg(long, value_parser = parse_format)]
        format: Option<WireFormat>,
        /// Print the conformance report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a requisition response and report conformance findings
    CheckResponse {
        /// Path to the response payload
        path: PathBuf,
        /// Wire format (json or yaml); defaults to the file extension
        #[arg(long, value_parser = parse_format)]
        format: Option<WireFormat>,
        /// Print the conformance report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-encode a requisition request in another wire format
    ConvertRequest {
        /// Path to the request payload
        path: PathBuf,
        /// Target wire format
        #[arg(long, value_parser = parse_format)]
        to: WireFormat,
        /// Source wire format; defaults to the file extension
        #[arg(long, value_parser = parse_format)]
        from: Option<WireFormat>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Re-encode a requisition response in another wire format
    ConvertResponse {
        /// Path to the response payload
        path: PathBuf,
        /// Target wire format
        #[arg(long, value_parser = parse_format)]
        to: WireFormat,
        /// Source wire format; defaults to the file extension
        #[arg(long, value_parser = parse_format)]
        from: Option<WireFormat>,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_format(s: &str) -> Result<WireFormat, String> {
    WireFormat::parse(s).map_err(|e| e.to_string())
}

/// Entry point for the requisition CLI.
///
/// # Environment Variables
/// - `REQUISITION_FORMAT`: default wire format when no flag or extension decides (default: "json")
/// - `REQUISITION_CONFORMANCE`: `off`, `warn` or `enforce` (default: "warn")
/// - `RUST_LOG`: log filter, on top of `requisition=info`
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("requisition=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = CoreConfig::new(
        wire_format_from_env_value(std::env::var(FORMAT_ENV_VAR).ok())?,
        conformance_mode_from_env_value(std::env::var(CONFORMANCE_ENV_VAR).ok())?,
    );
    tracing::debug!(
        default_format = %cfg.default_format(),
        conformance = cfg.conformance_mode().as_str(),
        "resolved configuration"
    );
    let service = RequisitionService::new(Arc::new(cfg));

    match cli.command {
        Commands::CheckRequest { path, format, json } => {
            let checked = service
                .load_request(&path, format)
                .with_context(|| format!("checking request {}", path.display()))?;
            let summary = format!(
                "request {} ({} item(s))",
                checked.payload.message_tracking_id,
                checked.payload.requisition.items.len()
            );
            print_report(&summary, &checked.report, json)?;
        }
        Commands::CheckResponse { path, format, json } => {
            let checked = service
                .load_response(&path, format)
                .with_context(|| format!("checking response {}", path.display()))?;
            let summary = format!(
                "response {} ({}, {} line item(s))",
                checked.payload.body().message_tracking_id,
                checked.payload.header().requisition_status_code,
                checked.payload.line_items().len()
            );
            print_report(&summary, &checked.report, json)?;
        }
        Commands::ConvertRequest {
            path,
            to,
            from,
            output,
        } => {
            let rendered = service
                .convert_request(&path, from, to)
                .with_context(|| format!("converting request {}", path.display()))?;
            emit(&rendered, output.as_deref())?;
        }
        Commands::ConvertResponse {
            path,
            to,
            from,
            output,
        } => {
            let rendered = service
                .convert_response(&path, from, to)
                .with_context(|| format!("converting response {}", path.display()))?;
            emit(&rendered, output.as_deref())?;
        }
    }

    Ok(())
}

fn print_report(summary: &str, report: &ConformanceReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else if report.is_conformant() {
        println!("OK: {summary}");
    } else {
        println!("Findings for {summary}:");
        for finding in report.findings() {
            println!("  - {finding}");
        }
    }

    if !report.is_conformant() {
        bail!("{} conformance finding(s)", report.findings().len());
    }
    Ok(())
}

/// Pretty JSON comes back without a final newline while YAML ends with one.
fn terminated(rendered: &str) -> Cow<'_, str> {
    if rendered.ends_with('\n') {
        Cow::Borrowed(rendered)
    } else {
        Cow::Owned(format!("{rendered}\n"))
    }
}

fn emit(rendered: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let rendered = terminated(rendered);
    match output {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
