use anyhow::Context;
use grader_client::{LatencyDataset, LatencyReport};
use serde::Serialize;

use crate::cli::root_commands::LatencyArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::read_text;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct LatencySummary {
    cases: usize,
    mean_seconds: Option<f64>,
    max_seconds: Option<f64>,
}

impl From<&LatencyReport> for LatencySummary {
    fn from(report: &LatencyReport) -> Self {
        Self {
            cases: report.samples.len(),
            mean_seconds: report.mean_seconds,
            max_seconds: report.max_seconds,
        }
    }
}

/// Handle `autograder latency`.
pub async fn handle(args: &LatencyArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let json = read_text(&args.dataset).await?;
    let dataset = LatencyDataset::from_json(&json)
        .with_context(|| format!("invalid latency dataset {}", args.dataset))?;

    let spinner = Progress::spinner(&format!("Grading {} cases…", dataset.cases.len()));
    let report = match ctx.client.measure_latency(&dataset).await {
        Ok(report) => report,
        Err(error) => {
            spinner.finish_err("latency run aborted");
            return Err(error).context("grading call failed during latency run");
        }
    };
    spinner.finish_clear();

    match flags.format {
        OutputFormat::Table => {
            output(&report.samples, flags.format)?;
            println!();
            output(&LatencySummary::from(&report), flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}
