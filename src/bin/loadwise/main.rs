// ABOUTME: Loadwise CLI - runs the training-load analysis over provider export files
// ABOUTME: Reads Strava and Apple Health exports, prints the report as JSON or a summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Full report as JSON
//! loadwise analyze --strava activities.csv --apple-health workouts.json --format json
//!
//! # Running only, since March, forecast limited to 2 seconds
//! loadwise analyze --strava activities.csv --activity Running --from 2024-03-01 \
//!     --forecast-timeout-ms 2000
//!
//! # Activity kinds present in the exports
//! loadwise kinds --strava activities.csv
//! ```

mod input;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use loadwise::analytics::ForecastOutcome;
use loadwise::domain::models::{ActivityKind, SourceProvider};
use loadwise::logging::LoggingConfig;
use loadwise::providers::normalize_batch;
use loadwise::{AnalysisEngine, AnalysisFilters, AnalysisReport, AnalysisRequest, EngineConfig};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "loadwise",
    about = "Training load analytics for Strava and Apple Health exports",
    long_about = "Normalizes activity exports, computes acute/chronic training load and ACWR risk zones, and forecasts weekly distance."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full analysis and print the report
    Analyze {
        #[command(flatten)]
        inputs: InputArgs,

        /// Keep only this activity kind (e.g. "Running"); "All" keeps every kind
        #[arg(long)]
        activity: Option<String>,

        /// First date to include (YYYY-MM-DD, UTC)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last date to include (YYYY-MM-DD, UTC); defaults to the latest activity
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,

        /// Deadline for the forecast step in milliseconds
        #[arg(long)]
        forecast_timeout_ms: Option<u64>,
    },

    /// List the activity kinds found in the exports
    Kinds {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Strava export (CSV or JSON array); may be repeated
    #[arg(long, value_name = "FILE")]
    strava: Vec<PathBuf>,

    /// Apple Health export (CSV or JSON array); may be repeated
    #[arg(long = "apple-health", value_name = "FILE")]
    apple_health: Vec<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full report as pretty-printed JSON
    Json,
    /// Short human-readable summary
    Pretty,
}

impl InputArgs {
    fn build_request(&self, now: DateTime<Utc>) -> Result<AnalysisRequest> {
        let sources = self
            .strava
            .iter()
            .map(|path| (SourceProvider::Strava, path))
            .chain(
                self.apple_health
                    .iter()
                    .map(|path| (SourceProvider::AppleHealth, path)),
            );

        let mut request = AnalysisRequest::new(now);
        for (provider, path) in sources {
            request = request.with_batch(input::read_batch(provider, path)?);
        }
        if request.batches.is_empty() {
            anyhow::bail!("no input files given; use --strava and/or --apple-health");
        }
        Ok(request)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let config = EngineConfig::from_env()?;

    match cli.command {
        Command::Analyze {
            inputs,
            activity,
            from,
            to,
            format,
            forecast_timeout_ms,
        } => {
            let filters = AnalysisFilters {
                activity_kind: activity.as_deref().and_then(parse_activity_filter),
                start_date: from,
                end_date: to,
            };
            let request = inputs.build_request(Utc::now())?.with_filters(filters);

            let engine = AnalysisEngine::new(config);
            let report = match forecast_timeout_ms.or(config.forecast_timeout_ms) {
                Some(ms) => {
                    engine
                        .analyze_with_forecast_timeout(&request, Duration::from_millis(ms))
                        .await
                }
                None => engine.analyze(&request),
            };

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Pretty => print_summary(&report),
            }
        }
        Command::Kinds { inputs } => {
            let request = inputs.build_request(Utc::now())?;
            let mut kinds: Vec<ActivityKind> = Vec::new();
            for batch in &request.batches {
                let normalized = normalize_batch(batch)?;
                kinds.extend(normalized.records.iter().map(|r| r.activity_kind().clone()));
            }
            kinds.sort();
            kinds.dedup();
            info!(count = kinds.len(), "Listed activity kinds");
            for kind in kinds {
                println!("{kind}");
            }
        }
    }

    Ok(())
}

/// `None` for "All" (any case), otherwise the canonical kind or passthrough label
fn parse_activity_filter(value: &str) -> Option<ActivityKind> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(ActivityKind::from_label(value))
    }
}

fn print_summary(report: &AnalysisReport) {
    let overview = &report.overview;
    println!("Activities:      {}", overview.activity_count);
    println!("Total distance:  {:.2} km", overview.total_distance_km);
    println!("Total duration:  {:.2} min", overview.total_duration_minutes);
    println!("Average pace:    {} min/km", overview.mean_pace_min_per_km);
    if report.dropped_count > 0 {
        println!("Dropped:         {} (no start time)", report.dropped_count);
    }
    for rejected in &report.rejected_batches {
        println!("Rejected batch:  {} ({})", rejected.batch_index, rejected.error);
    }

    println!();
    println!("ACWR: {}", report.acwr_summary.message);
    if let Some(kind) = &report.acwr_summary.primary_risk_kind {
        println!("Highest ACWR kind: {kind}");
    }

    println!();
    println!("Weekly distance:");
    for week in &report.weekly_summary {
        println!(
            "  {}-W{:02}  {:>8.2} km  {:>3} activities",
            week.iso_year, week.iso_week, week.total_distance_km, week.activity_count
        );
    }

    println!();
    match &report.forecast {
        ForecastOutcome::Available(forecast) => {
            println!("Forecast (95% interval):");
            for point in &forecast.points {
                println!(
                    "  {}  {:>8.2} km  [{:.2}, {:.2}]",
                    point.week_start.date_naive(),
                    point.projected_distance_km,
                    point.lower_95_km,
                    point.upper_95_km
                );
            }
        }
        ForecastOutcome::Unavailable { message, .. } => println!("Forecast unavailable: {message}"),
    }
}
