// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// tryon-check — run the try-on photo quality gate from the command line.
//
// Entry point. Initialises logging, loads the thresholds, analyses every
// input concurrently, and prints results in input order.

mod input;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::task::JoinSet;
use tryon_core::QualityConfig;
use tryon_core::human_errors::humanize_error;
use tryon_quality::ImageQualityAnalyzer;

use report::InputReport;

/// Check whether photos are good enough for virtual try-on.
///
/// Each INPUT is an image file (PNG, JPEG, WEBP, ...) or a literal
/// `data:<mime>;base64,...` URL.
#[derive(Parser, Debug)]
#[command(name = "tryon-check", version)]
struct Args {
    /// Image files or data URLs to check.
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<String>,

    /// JSON file overriding the default thresholds.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a JSON array instead of text.
    #[arg(long)]
    json: bool,

    /// Include the measured brightness and sharpness.
    #[arg(short, long)]
    detailed: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match QualityConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(error = %err, path = %path.display(), "Could not load config");
                let human = humanize_error(&err);
                eprintln!("{} {}", human.message, human.suggestion);
                return ExitCode::from(2);
            }
        },
        None => QualityConfig::default(),
    };
    tracing::debug!(?config, "Thresholds loaded");

    let reports = run(ImageQualityAnalyzer::new(config), &args.inputs, args.detailed).await;

    if args.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!(error = %err, "Could not serialise report");
                return ExitCode::from(2);
            }
        }
    } else {
        for report in &reports {
            println!("{}", report.render_text());
        }
    }

    if reports.iter().all(InputReport::passed) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Analyse every input concurrently; the result keeps input order.
async fn run(
    analyzer: ImageQualityAnalyzer,
    inputs: &[String],
    detailed: bool,
) -> Vec<InputReport> {
    let mut tasks = JoinSet::new();
    for (index, arg) in inputs.iter().cloned().enumerate() {
        let analyzer = analyzer.clone();
        tasks.spawn(async move {
            let label = display_label(&arg);
            let report = match input::load_input(&arg).await {
                Ok(image) => {
                    let fingerprint = image.fingerprint();
                    tracing::info!(input = %label, %fingerprint, "Checking photo");
                    let assessment = analyzer.analyze_detailed_async(image).await;
                    InputReport::analyzed(label, fingerprint, assessment, detailed)
                }
                Err(err) => {
                    tracing::warn!(input = %label, error = %err, "Could not read input");
                    InputReport::failed(label, &err)
                }
            };
            (index, report)
        });
    }

    let mut slots: Vec<Option<InputReport>> = std::iter::repeat_with(|| None)
        .take(inputs.len())
        .collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, report)) => slots[index] = Some(report),
            Err(err) => tracing::error!(error = %err, "Input task failed"),
        }
    }

    slots
        .into_iter()
        .zip(inputs)
        .map(|(slot, arg)| {
            slot.unwrap_or_else(|| InputReport {
                input: display_label(arg),
                fingerprint: None,
                verdict: None,
                metrics: None,
                message: None,
                error: Some("analysis task failed".into()),
            })
        })
        .collect()
}

/// Data URLs are shortened to their header for display.
fn display_label(arg: &str) -> String {
    match arg.split_once(',') {
        Some((header, payload)) if arg.starts_with("data:") => {
            format!("{header},<{} chars>", payload.len())
        }
        _ => arg.to_owned(),
    }
}
