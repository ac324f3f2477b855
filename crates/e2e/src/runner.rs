//! Scenario runner: executes specs against a fresh `ColorState` each
//!
//! Scenarios run on a current-thread tokio runtime with a paused clock, so
//! `wait` steps advance virtual time and feedback timing is exact.

use chrono::{DateTime, Utc};
use colormix_common::{ColorState, FeedbackState, MemoryClipboard, DEFAULT_FEEDBACK_DURATION};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::error::{E2eError, E2eResult};
use crate::spec::{ClipboardMode, FeedbackExpectation, TestSpec, TestStep};

/// Result of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    pub step_name: String,
    /// Hex color after the step ran
    pub hex: String,
    pub error: Option<String>,
}

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    /// Virtual time consumed by `wait` steps
    pub virtual_ms: u64,
    pub steps: Vec<StepResult>,
    pub error: Option<String>,
}

/// Result of running all scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestSuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Scenario file or directory
    pub specs_dir: PathBuf,
    /// Output directory for results
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            specs_dir: PathBuf::from("scenarios"),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Scenario runner
pub struct ScenarioRunner {
    config: RunnerConfig,
}

impl ScenarioRunner {
    /// Create a new runner with default configuration
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    /// Create a runner with custom configuration
    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run every scenario under the specs path
    pub fn run_all(&self) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        self.run_selected(specs, |_| true)
    }

    /// Run scenarios carrying a tag; the rest count as skipped
    pub fn run_tagged(&self, tag: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        self.run_selected(specs, |spec| spec.has_tag(tag))
    }

    /// Run a specific scenario by name; the rest count as skipped
    pub fn run_named(&self, name: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        if !specs.iter().any(|s| s.name == name) {
            return Err(E2eError::ScenarioNotFound(name.to_string()));
        }
        self.run_selected(specs, |spec| spec.name == name)
    }

    fn run_selected(
        &self,
        specs: Vec<TestSpec>,
        keep: impl Fn(&TestSpec) -> bool,
    ) -> E2eResult<TestSuiteResult> {
        let (selected, skipped): (Vec<TestSpec>, Vec<TestSpec>) =
            specs.into_iter().partition(|spec| keep(spec));
        for spec in &skipped {
            debug!("Skipping scenario: {}", spec.name);
        }
        self.block_on_suite(&selected, skipped.len())
    }

    /// Run a list of scenarios on a fresh paused-clock runtime.
    ///
    /// Must not be called from inside another tokio runtime; use
    /// `spawn_blocking` there, or [`ScenarioRunner::run_specs_async`].
    pub fn run_specs(&self, specs: &[TestSpec]) -> E2eResult<TestSuiteResult> {
        self.block_on_suite(specs, 0)
    }

    fn block_on_suite(&self, specs: &[TestSpec], skipped: usize) -> E2eResult<TestSuiteResult> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .map_err(|e| E2eError::Runtime(e.to_string()))?;

        Ok(runtime.block_on(self.run_suite(specs, skipped)))
    }

    /// Run a list of scenarios on the current runtime.
    ///
    /// `wait` steps take real time unless the runtime's clock is paused.
    pub async fn run_specs_async(&self, specs: &[TestSpec]) -> TestSuiteResult {
        self.run_suite(specs, 0).await
    }

    async fn run_suite(&self, specs: &[TestSpec], skipped: usize) -> TestSuiteResult {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        info!("Running {} scenario(s)...", specs.len());

        for spec in specs {
            let result = self.run_spec(spec).await;
            if result.success {
                passed += 1;
                info!("✓ {} ({} steps)", result.name, result.steps.len());
            } else {
                failed += 1;
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Scenario results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms
        );

        TestSuiteResult {
            started_at,
            total: specs.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
        }
    }

    /// Run a single scenario, stopping at its first failing step
    pub async fn run_spec(&self, spec: &TestSpec) -> TestResult {
        let start = Instant::now();
        let virtual_start = tokio::time::Instant::now();
        debug!("Running scenario: {}", spec.name);

        let clipboard = MemoryClipboard::new();
        clipboard.set_denied(spec.clipboard == ClipboardMode::Denied);

        let mut builder = ColorState::builder(Arc::new(clipboard.clone())).feedback_duration(
            spec.feedback_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_FEEDBACK_DURATION),
        );
        if let Some(initial) = spec.initial {
            builder = builder.initial(initial);
        }
        if let Some(policy) = spec.channel_policy {
            builder = builder.policy(policy);
        }
        let mut session = Session {
            state: builder.build(),
            clipboard,
        };

        let mut step_results = Vec::new();
        let mut test_error: Option<String> = None;

        for step in &spec.steps {
            let step_name = step.describe();
            let outcome = session.execute_step(step).await;
            let success = outcome.is_ok();
            let error = outcome.err().map(|e| e.to_string());

            step_results.push(StepResult {
                success,
                step_name: step_name.clone(),
                hex: session.state.to_hex(),
                error: error.clone(),
            });

            if let Some(reason) = error {
                test_error = Some(
                    E2eError::StepFailed {
                        step: step_name,
                        reason,
                    }
                    .to_string(),
                );
                break; // Stop on first failure
            }
        }

        TestResult {
            name: spec.name.clone(),
            success: test_error.is_none(),
            duration_ms: start.elapsed().as_millis() as u64,
            virtual_ms: virtual_start.elapsed().as_millis() as u64,
            steps: step_results,
            error: test_error,
        }
    }

    /// Write results to `test-results.json` in the output directory
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// State a scenario mutates
struct Session {
    state: ColorState,
    clipboard: MemoryClipboard,
}

impl Session {
    fn execute_step<'a>(
        &'a mut self,
        step: &'a TestStep,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = E2eResult<()>> + 'a>> {
        // Boxed because expect_error recurses into its wrapped step
        Box::pin(async move {
            match step {
                TestStep::SetChannel { channel, value } => {
                    self.state.set_channel(*channel, *value)?;
                }
                TestStep::SetHex { value } => {
                    self.state.set_hex(value)?;
                }
                TestStep::ApplyPreset { preset } => {
                    self.state.apply_preset_named(preset)?;
                }
                TestStep::Copy { format } => {
                    self.state.copy_to_clipboard(*format).await?;
                }
                TestStep::Wait { ms } => {
                    tokio::time::sleep(Duration::from_millis(*ms)).await;
                    // Let a hide task that came due run before the next step looks
                    tokio::task::yield_now().await;
                }
                TestStep::Reset => self.state.reset(),
                TestStep::Clipboard { available } => self.clipboard.set_denied(!available),
                TestStep::Assert {
                    hex,
                    rgb,
                    channels,
                    feedback,
                    feedback_text,
                    clipboard,
                } => {
                    self.check(
                        hex.as_deref(),
                        rgb.as_deref(),
                        *channels,
                        *feedback,
                        feedback_text.as_deref(),
                        clipboard.as_deref(),
                    )?;
                }
                TestStep::ExpectError { error, step } => {
                    let before = self.state.color();
                    match self.execute_step(step).await {
                        Ok(()) => {
                            return Err(E2eError::AssertionFailed(format!(
                                "expected {} but the step succeeded",
                                error
                            )));
                        }
                        Err(E2eError::Color(e)) if e.kind() == error.as_str() => {
                            debug!("Expected failure: {}", e);
                        }
                        Err(other) => {
                            return Err(E2eError::AssertionFailed(format!(
                                "expected {} but got: {}",
                                error, other
                            )));
                        }
                    }
                    if self.state.color() != before {
                        return Err(E2eError::AssertionFailed(format!(
                            "color changed from {} to {} on a failed step",
                            before,
                            self.state.color()
                        )));
                    }
                }
                TestStep::Log { message } => info!("{}", message),
            }
            Ok(())
        })
    }

    fn check(
        &self,
        hex: Option<&str>,
        rgb: Option<&str>,
        channels: Option<[u8; 3]>,
        feedback: Option<FeedbackExpectation>,
        feedback_text: Option<&str>,
        clipboard: Option<&str>,
    ) -> E2eResult<()> {
        let snapshot = self.state.snapshot();

        if let Some(expected) = hex {
            expect_eq("hex", expected, &snapshot.hex)?;
        }
        if let Some(expected) = rgb {
            expect_eq("rgb", expected, &snapshot.rgb)?;
        }
        if let Some([r, g, b]) = channels {
            let actual = (snapshot.r, snapshot.g, snapshot.b);
            if actual != (r, g, b) {
                return Err(E2eError::AssertionFailed(format!(
                    "channels: expected ({}, {}, {}), got {:?}",
                    r, g, b, actual
                )));
            }
        }
        if let Some(expected) = feedback {
            let visible = snapshot.feedback.is_visible();
            let wanted = expected == FeedbackExpectation::Visible;
            if visible != wanted {
                return Err(E2eError::AssertionFailed(format!(
                    "feedback: expected {:?}, got {}",
                    expected, snapshot.feedback
                )));
            }
        }
        if let Some(expected) = feedback_text {
            match &snapshot.feedback {
                FeedbackState::Visible(text) => expect_eq("feedback_text", expected, text)?,
                FeedbackState::Hidden => {
                    return Err(E2eError::AssertionFailed(format!(
                        "feedback_text: expected '{}', feedback is hidden",
                        expected
                    )));
                }
            }
        }
        if let Some(expected) = clipboard {
            let actual = self.clipboard.contents();
            if actual.as_deref() != Some(expected) {
                return Err(E2eError::AssertionFailed(format!(
                    "clipboard: expected '{}', got {:?}",
                    expected, actual
                )));
            }
        }
        Ok(())
    }
}

fn expect_eq(field: &str, expected: &str, actual: &str) -> E2eResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed(format!(
            "{}: expected '{}', got '{}'",
            field, expected, actual
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(yaml: &str) -> TestResult {
        let spec = TestSpec::from_yaml(yaml).unwrap();
        let suite = ScenarioRunner::new().run_specs(&[spec]).unwrap();
        suite.results.into_iter().next().unwrap()
    }

    #[test]
    fn test_passing_scenario() {
        let result = run(r##"
name: copy-feedback
steps:
  - action: copy
    format: hex
  - action: assert
    feedback: visible
    feedback_text: "#FF5733"
    clipboard: "#FF5733"
  - action: wait
    ms: 1999
  - action: assert
    feedback: visible
  - action: wait
    ms: 2
  - action: assert
    feedback: hidden
"##);
        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.steps.len(), 6);
        assert!(result.virtual_ms >= 2001);
    }

    #[test]
    fn test_failing_assert_stops_scenario() {
        let result = run(r##"
name: wrong
steps:
  - action: apply_preset
    preset: red
  - action: assert
    rgb: "rgb(0, 0, 0)"
  - action: reset
"##);
        assert!(!result.success);
        assert_eq!(result.steps.len(), 2);
        let error = result.error.unwrap();
        assert!(error.contains("rgb(255, 0, 0)"), "{}", error);
    }

    #[test]
    fn test_expect_error() {
        let result = run(r##"
name: purple
steps:
  - action: expect_error
    error: unknown_preset
    step:
      action: apply_preset
      preset: purple
  - action: assert
    hex: "#FF5733"
"##);
        assert!(result.success, "{:?}", result.error);
    }

    #[test]
    fn test_expect_error_wrong_kind() {
        let result = run(r##"
name: mismatch
clipboard: denied
steps:
  - action: expect_error
    error: unknown_preset
    step:
      action: copy
      format: rgb
"##);
        assert!(!result.success);
    }

    #[test]
    fn test_expect_error_on_success() {
        let result = run(r##"
name: not-an-error
steps:
  - action: expect_error
    error: unknown_preset
    step:
      action: apply_preset
      preset: blue
"##);
        assert!(!result.success);
        assert!(result.error.unwrap().contains("succeeded"));
    }

    #[test]
    fn test_write_results() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScenarioRunner::with_config(RunnerConfig {
            specs_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("out"),
        });
        let suite = runner
            .run_specs(&[TestSpec::from_yaml("name: empty\nsteps: []\n").unwrap()])
            .unwrap();
        assert!(suite.success());

        let path = runner.write_results(&suite).unwrap();
        let written: TestSuiteResult =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written.total, 1);
        assert_eq!(written.passed, 1);
    }
}
