//! The outcome of a run: per-provider tallies and the grand total.
//!
//! The text form is what `runtests` prints after the run; the JSON form is a
//! machine-readable summary of the same data.

use serde::Serialize;
use uuid::Uuid;

use crate::result::TestResult;

/// Exit status reserved for runs that aborted before producing a tally.
pub const FATAL_EXIT_CODE: u8 = 255;

/// Largest exit status a failure count maps to.
pub const MAX_FAILURE_EXIT_CODE: u8 = 254;

/// The tally of one registered provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOutcome {
    pub name: String,
    pub result: TestResult,
}

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub providers: Vec<ProviderOutcome>,
    /// Registry providers plus the extra passes.
    pub doctests: TestResult,
    /// The extra passes alone; zero in quick mode.
    pub extra: TestResult,
    pub visual: TestResult,
}

impl RunReport {
    /// Doctests plus the visual battery.
    pub fn grand(&self) -> TestResult {
        self.doctests + self.visual
    }

    /// Failure count saturated to fit below [`FATAL_EXIT_CODE`].
    pub fn exit_code(&self) -> u8 {
        u8::try_from(self.grand().failures())
            .unwrap_or(MAX_FAILURE_EXIT_CODE)
            .min(MAX_FAILURE_EXIT_CODE)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Regression run {} ===\n", self.run_id));
        for p in &self.providers {
            let status = if p.result.is_passing() { "PASS" } else { "FAIL" };
            out.push_str(&format!("  [{status}] {:<24} {}\n", p.name, p.result));
        }
        if self.extra.total() > 0 {
            let status = if self.extra.is_passing() { "PASS" } else { "FAIL" };
            out.push_str(&format!("  [{status}] {:<24} {}\n", "extra checks", self.extra));
        }
        out.push_str(&format!("All doctests: {}\n", self.doctests));
        out.push_str(&format!("Visual tests: {}\n", self.visual));
        out.push_str(&format!("Total: {}\n", self.grand()));
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
