//! Scenario Commands

use anyhow::{Context, Result};
use clap::Parser;
use colormix_e2e::runner::{RunnerConfig, TestResult, TestSuiteResult};
use colormix_e2e::ScenarioRunner;
use serde::Serialize;
use std::path::PathBuf;

use crate::output::{print_error, print_list, print_success, OutputFormat, TableDisplay};

#[derive(Parser)]
pub struct ScenarioArgs {
    /// Scenario file or directory (defaults to the bundled scenarios)
    pub path: Option<PathBuf>,

    /// Run only scenarios with this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Run only the scenario with this name
    #[arg(short, long, conflicts_with = "tag")]
    pub name: Option<String>,

    /// Write test-results.json into this directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Scenario result display wrapper for serialization
#[derive(Serialize)]
pub struct ScenarioDisplay {
    pub name: String,
    pub status: String,
    pub steps: usize,
    pub virtual_ms: u64,
    pub error: String,
}

impl From<&TestResult> for ScenarioDisplay {
    fn from(result: &TestResult) -> Self {
        Self {
            name: result.name.clone(),
            status: if result.success { "pass" } else { "FAIL" }.to_string(),
            steps: result.steps.len(),
            virtual_ms: result.virtual_ms,
            error: result.error.clone().unwrap_or_default(),
        }
    }
}

impl TableDisplay for ScenarioDisplay {
    fn headers() -> Vec<&'static str> {
        vec!["Scenario", "Status", "Steps", "Virtual ms", "Error"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.status.clone(),
            self.steps.to_string(),
            self.virtual_ms.to_string(),
            self.error.clone(),
        ]
    }
}

/// Run the scenarios; returns whether every one passed
pub async fn execute(args: ScenarioArgs, format: OutputFormat) -> Result<bool> {
    let specs_dir = args
        .path
        .clone()
        .unwrap_or_else(colormix_e2e::bundled_scenarios_dir);
    let mut config = RunnerConfig {
        specs_dir,
        ..Default::default()
    };
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }

    // The runner drives its own paused-clock runtime
    let (name, tag) = (args.name, args.tag);
    let (runner, suite) = tokio::task::spawn_blocking(move || {
        let runner = ScenarioRunner::with_config(config);
        let suite = match (&name, &tag) {
            (Some(name), _) => runner.run_named(name),
            (None, Some(tag)) => runner.run_tagged(tag),
            (None, None) => runner.run_all(),
        };
        (runner, suite)
    })
    .await
    .context("scenario runner panicked")?;
    let suite: TestSuiteResult = suite?;

    let rows: Vec<ScenarioDisplay> = suite.results.iter().map(ScenarioDisplay::from).collect();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&suite)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&suite)?),
        _ => print_list(&rows, format),
    }

    if args.output.is_some() {
        let path = runner.write_results(&suite)?;
        print_success(&format!("Results written to {}", path.display()));
    }

    if suite.success() {
        print_success(&format!("{} of {} scenarios passed", suite.passed, suite.total));
    } else {
        print_error(&format!("{} of {} scenarios failed", suite.failed, suite.total));
    }
    Ok(suite.success())
}
