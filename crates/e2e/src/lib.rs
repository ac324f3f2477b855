//! Colormix Scenario Framework
//!
//! Declarative YAML scenarios that pin down the color-state contract: channel
//! clamping, hex and rgb formatting, the preset table, and copy feedback
//! timing. Each scenario runs directly against a fresh `ColorState` with an
//! in-memory clipboard.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Scenario Runner (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                             │
//! │    ├── run_all() / run_tagged() / run_named()               │
//! │    ├── run_spec(spec: TestSpec) -> TestResult               │
//! │    └── write_results(suite) -> test-results.json            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestSpec (YAML)                                            │
//! │    ├── name, description, tags                              │
//! │    ├── initial, clipboard, feedback_ms, channel_policy      │
//! │    └── steps: [Step]                                        │
//! │          ├── set_channel { channel, value }                 │
//! │          ├── set_hex { value } / apply_preset { preset }    │
//! │          ├── copy { format } / wait { ms } / reset          │
//! │          ├── clipboard { available }                        │
//! │          ├── assert { hex?, rgb?, channels?, feedback? }    │
//! │          └── expect_error { error, step }                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod runner;
pub mod spec;

pub use error::{E2eError, E2eResult};
pub use runner::{RunnerConfig, ScenarioRunner, TestResult, TestSuiteResult};
pub use spec::{TestSpec, TestStep};

/// Directory holding the scenarios that ship with this crate
pub fn bundled_scenarios_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}
