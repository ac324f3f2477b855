//! Runs the bundled scenario files and a few generated ones.
//!
//! Run with: cargo test --package colormix-e2e --test scenarios

use colormix_e2e::runner::RunnerConfig;
use colormix_e2e::{bundled_scenarios_dir, ScenarioRunner, TestSpec};
use test_case::test_case;

fn runner() -> ScenarioRunner {
    ScenarioRunner::with_config(RunnerConfig {
        specs_dir: bundled_scenarios_dir(),
        ..Default::default()
    })
}

#[test]
fn bundled_scenarios_pass() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let suite = runner().run_all().unwrap();

    assert!(suite.total >= 7, "expected the bundled scenarios, found {}", suite.total);
    for result in &suite.results {
        assert!(result.success, "{} failed: {:?}", result.name, result.error);
    }
    assert!(suite.success());
}

#[test]
fn smoke_tag_selects_subset() {
    let all = runner().run_all().unwrap();
    let smoke = runner().run_tagged("smoke").unwrap();
    assert!(smoke.total > 0);
    assert!(smoke.total < all.total);
    assert_eq!(smoke.failed, 0);
    assert_eq!(all.skipped, 0);
    assert_eq!(smoke.total + smoke.skipped, all.total);
}

#[test]
fn run_named_scenario() {
    let suite = runner().run_named("copy-feedback").unwrap();
    assert_eq!(suite.total, 1);
    assert_eq!(suite.skipped, runner().run_all().unwrap().total - 1);
    assert!(suite.results[0].virtual_ms >= 3500);
    assert!(suite.success());

    assert!(runner().run_named("does-not-exist").is_err());
}

#[test_case("red", "#FF0000", "rgb(255, 0, 0)")]
#[test_case("green", "#00FF00", "rgb(0, 255, 0)")]
#[test_case("blue", "#0000FF", "rgb(0, 0, 255)")]
#[test_case("yellow", "#FFFF00", "rgb(255, 255, 0)")]
#[test_case("black", "#000000", "rgb(0, 0, 0)")]
#[test_case("white", "#FFFFFF", "rgb(255, 255, 255)")]
fn preset_then_copy_both_formats(preset: &str, hex: &str, rgb: &str) {
    let yaml = format!(
        r#"
name: preset-{preset}
steps:
  - action: apply_preset
    preset: {preset}
  - action: copy
    format: hex
  - action: assert
    hex: "{hex}"
    clipboard: "{hex}"
    feedback_text: "{hex}"
  - action: copy
    format: rgb
  - action: assert
    rgb: "{rgb}"
    clipboard: "{rgb}"
    feedback_text: "{rgb}"
"#
    );
    let spec = TestSpec::from_yaml(&yaml).unwrap();
    let suite = ScenarioRunner::new().run_specs(&[spec]).unwrap();
    assert!(suite.success(), "{:?}", suite.results[0].error);
}

#[test]
fn custom_feedback_window() {
    let spec = TestSpec::from_yaml(
        r#"
name: short-feedback
feedback_ms: 300
steps:
  - action: copy
    format: hex
  - action: wait
    ms: 299
  - action: assert
    feedback: visible
  - action: wait
    ms: 2
  - action: assert
    feedback: hidden
"#,
    )
    .unwrap();
    let suite = ScenarioRunner::new().run_specs(&[spec]).unwrap();
    assert!(suite.success(), "{:?}", suite.results[0].error);
}

#[test]
fn missing_path_is_an_error() {
    let runner = ScenarioRunner::with_config(RunnerConfig {
        specs_dir: "/definitely/not/here".into(),
        ..Default::default()
    });
    assert!(runner.run_all().is_err());
}
