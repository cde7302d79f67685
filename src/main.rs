use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use trafficwarden::analysis::{HourlySeries, TrafficReport};
use trafficwarden::traffic::TrafficHistory;

#[derive(Parser)]
#[command(
    name = "trafficwarden",
    about = "Traffic anomaly analysis and rate-limit planning for 24-hour API request series",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deterministic synthetic traffic history
    Simulate {
        /// RNG seed; the same seed always yields the same history
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Write the history JSON to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Analyze the aggregate series and print the report
        #[arg(long)]
        analyze: bool,

        /// Report format (with --analyze)
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Analyze an hourly request-rate series
    Analyze {
        /// Series file: a JSON array of counts, or a traffic history object
        /// as written by `simulate`; stdin when omitted or "-"
        #[arg(long)]
        input: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Aligned plain-text report
    Text,
    /// key=value lines for scripts and CI outputs
    KeyValue,
    /// Report JSON in a data/meta envelope
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            seed,
            output,
            analyze,
            format,
        } => {
            tracing::info!(seed, "Simulating 24-hour traffic history");
            let history = trafficwarden::traffic::simulate(seed);

            if let Some((hour, value)) = history.peak() {
                tracing::info!(hour, value, "Aggregate peak");
            }
            for (user, requests) in history.user_totals() {
                tracing::info!(%user, requests, "User total");
            }

            if let Some(path) = &output {
                let json = serde_json::to_string_pretty(&history)?;
                std::fs::write(path, json)
                    .with_context(|| format!("writing history to {}", path.display()))?;
                tracing::info!(path = %path.display(), "History written");
            } else if !analyze {
                println!("{}", serde_json::to_string_pretty(&history)?);
            }

            if analyze {
                let report = trafficwarden::analysis::analyze(&history.total_series())
                    .context("analyzing simulated history")?;
                emit_report(&report, Some(&history), format)?;
            }
        }
        Commands::Analyze { input, format } => {
            let raw = read_input(input.as_deref())?;
            let (series, history) = parse_series(&raw)?;
            let report = trafficwarden::analysis::analyze(&series)
                .context("analyzing request-rate series")?;
            tracing::info!("{}", trafficwarden::report::format_summary(&report));
            emit_report(&report, history.as_ref(), format)?;
        }
    }

    Ok(())
}

/// Read the series source: a file path, or stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("reading series from {}", p.display())),
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("reading series from stdin")?;
            Ok(raw)
        }
    }
}

/// Accept either a bare JSON array of hourly counts or a full traffic
/// history object; histories analyze their aggregate row.
fn parse_series(raw: &str) -> Result<(HourlySeries, Option<TrafficHistory>)> {
    if let Ok(series) = serde_json::from_str::<HourlySeries>(raw) {
        return Ok((series, None));
    }

    let history: TrafficHistory = serde_json::from_str(raw)
        .context("input is neither a JSON array of counts nor a traffic history")?;
    let series = history.total_series();
    Ok((series, Some(history)))
}

/// Surface the analyzer result: warn on flagged hours, then print in the
/// requested format. Text reports of a full history append the user table.
fn emit_report(
    report: &TrafficReport,
    history: Option<&TrafficHistory>,
    format: OutputFormat,
) -> Result<()> {
    if !report.anomalies.is_empty() {
        tracing::warn!(hours = ?report.anomaly_hours(), "Anomalous traffic detected");
    }

    match format {
        OutputFormat::Text => {
            println!("{}", trafficwarden::report::render_text(report));
            if let Some(history) = history {
                println!("{}", trafficwarden::report::render_user_table(history));
            }
        }
        OutputFormat::KeyValue => {
            print!("{}", trafficwarden::report::render_key_values(report));
        }
        OutputFormat::Json => {
            let envelope = serde_json::json!({
                "data": report,
                "meta": {
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}
