use crate::checks::CheckResult;
use crate::error::{ProbeError, Result};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// File the CLI writes the report to, relative to the working directory
pub const REPORT_FILE: &str = "security-test-report.md";

/// Read-only summary of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    results: Vec<CheckResult>,
}

impl Report {
    pub fn new(results: Vec<CheckResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed()).count()
    }

    /// Percentage of checks that passed; 0.0 for an empty run
    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        self.passed() as f64 / self.total() as f64 * 100.0
    }

    /// Markdown body of the report
    pub fn render(&self) -> String {
        let mut out = String::from("# OWASP Security Test Report\n\n");

        // Writing into a String cannot fail
        let _ = writeln!(out, "## Summary");
        let _ = writeln!(out, "- Tests Passed: {}/{}", self.passed(), self.total());
        let _ = writeln!(out, "- Pass Rate: {:.1}%\n", self.pass_rate());

        out.push_str("## Detailed Results\n\n");
        for result in &self.results {
            let status = if result.passed() {
                "✓ PASSED"
            } else {
                "✗ FAILED"
            };
            let _ = writeln!(out, "### {}: {}", result.name(), status);
            if !result.issues().is_empty() {
                out.push_str("Issues:\n");
                for issue in result.issues() {
                    let _ = writeln!(out, "- {}", issue);
                }
            }
            out.push('\n');
        }

        out
    }

    /// JSON form for programmatic consumers
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "total": self.total(),
            "passed": self.passed(),
            "pass_rate": self.pass_rate(),
            "results": self.results,
        })
    }

    /// Write the rendered report to `path`
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render())
            .map_err(|e| ProbeError::report_write(path.display().to_string(), e.to_string()))?;
        info!("Report saved to {}", path.display());
        Ok(())
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
