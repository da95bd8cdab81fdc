// system-tests/src/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Artifact helpers for live pet-store groups.
// Purpose: Create per-group run roots and write deterministic summaries.
// Dependencies: petstore-client, serde, serde_jcs, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`TestReporter`] owns one group's artifact directory. A finished group
//! leaves `summary.json`, `summary.md`, `transcript.json` and
//! `scenarios.json` behind. A reporter dropped before finishing still writes
//! a summary with status `panic` or `unknown`.
//!
//! JSON artifacts are JCS-canonical, so every numeric field stays within the
//! `u64` range.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use petstore_client::ApiClient;
use petstore_client::GroupFailure;
use petstore_client::GroupReport;
use serde::Serialize;
use thiserror::Error;

use crate::bootstrap::SuiteTarget;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure returned when a group is finalized.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An artifact could not be written.
    #[error("artifact write failed: {0}")]
    Io(#[from] io::Error),
    /// The group verdict was a failure.
    #[error(transparent)]
    Group(#[from] GroupFailure),
}

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Contents of `summary.json`.
#[derive(Debug, Serialize)]
struct TestSummary {
    /// Group name.
    test_name: String,
    /// Final status label.
    status: String,
    /// Service under test.
    base_url: String,
    /// Wall-clock start in Unix milliseconds.
    started_at_ms: u64,
    /// Wall-clock end in Unix milliseconds.
    ended_at_ms: u64,
    /// Elapsed milliseconds.
    duration_ms: u64,
    /// One line per scenario plus mode notes.
    notes: Vec<String>,
    /// Artifact file names written for the group.
    artifacts: Vec<String>,
}

/// Returns the current Unix time in milliseconds.
fn now_millis() -> u64 {
    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Returns the timestamped default root for a group.
fn default_run_root(test_name: &str) -> PathBuf {
    let stamp = now_millis();
    PathBuf::from("target/system-tests").join(format!("run_{stamp}")).join(test_name)
}

// ============================================================================
// SECTION: Artifacts
// ============================================================================

/// Artifact manager for a single group.
#[derive(Debug, Clone)]
pub struct TestArtifacts {
    /// Directory receiving this group's files.
    root: PathBuf,
}

impl TestArtifacts {
    /// Creates the artifact root for a group.
    ///
    /// An overridden run root is shared by all groups, so each group writes
    /// into its own subdirectory.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created.
    pub fn new(test_name: &str, run_root: Option<&Path>) -> io::Result<Self> {
        let root = run_root
            .map_or_else(|| default_run_root(test_name), |root| root.join(test_name));
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the root directory for the group artifacts.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes a text artifact with UTF-8 encoding.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the write fails.
    pub fn write_text(&self, name: &str, value: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())?;
        Ok(path)
    }
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Helper that writes summaries even when a group panics.
#[derive(Debug)]
pub struct TestReporter {
    /// Artifact directory for the group.
    artifacts: TestArtifacts,
    /// Group name.
    test_name: String,
    /// Service under test.
    base_url: String,
    /// Wall-clock start in Unix milliseconds.
    started_at_ms: u64,
    /// Whether a summary has been written.
    finalized: bool,
}

impl TestReporter {
    /// Creates a reporter for the named group.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the artifact directory cannot be created.
    pub fn new(test_name: &str, suite: &SuiteTarget) -> io::Result<Self> {
        Ok(Self {
            artifacts: TestArtifacts::new(test_name, suite.run_root())?,
            test_name: test_name.to_string(),
            base_url: suite.target().base_url().to_string(),
            started_at_ms: now_millis(),
            finalized: false,
        })
    }

    /// Returns the artifact manager.
    #[must_use]
    pub const fn artifacts(&self) -> &TestArtifacts {
        &self.artifacts
    }

    /// Writes the final summary for the group.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when either summary file cannot be written.
    pub fn finish(
        &mut self,
        status: &str,
        notes: Vec<String>,
        artifacts: Vec<String>,
    ) -> io::Result<()> {
        let ended_at_ms = now_millis();
        let summary = TestSummary {
            test_name: self.test_name.clone(),
            status: status.to_string(),
            base_url: self.base_url.clone(),
            started_at_ms: self.started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(self.started_at_ms),
            notes,
            artifacts,
        };
        self.artifacts.write_json("summary.json", &summary)?;
        self.artifacts.write_text("summary.md", &summary_markdown(&summary))?;
        self.finalized = true;
        Ok(())
    }

    /// Writes the transcript and scenario report, then the summary, and
    /// returns the group verdict.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] when an artifact cannot be written and
    /// [`ReportError::Group`] when the verdict fails.
    pub fn finish_group(
        &mut self,
        client: &ApiClient,
        report: &GroupReport,
        strict: bool,
    ) -> Result<(), ReportError> {
        self.artifacts.write_json("transcript.json", &client.transcript())?;
        self.artifacts.write_json("scenarios.json", report)?;
        let verdict = report.verdict(strict);
        let status = if verdict.is_ok() { "passed" } else { "failed" };
        let mut notes = report.notes();
        if !strict && !report.reproduced_discrepancies().is_empty() {
            notes.push("reproduced known discrepancies are informational in lenient mode".to_string());
        }
        self.finish(
            status,
            notes,
            vec![
                "summary.json".to_string(),
                "summary.md".to_string(),
                "transcript.json".to_string(),
                "scenarios.json".to_string(),
            ],
        )?;
        tracing::info!(
            group = %report.group,
            status,
            root = %self.artifacts.root().display(),
            "group artifacts written"
        );
        verdict?;
        Ok(())
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let status = if std::thread::panicking() { "panic" } else { "unknown" };
        if let Err(err) = self.finish(
            status,
            vec!["group terminated without explicit summary".to_string()],
            Vec::new(),
        ) {
            tracing::warn!(group = %self.test_name, error = %err, "summary write failed on drop");
        }
    }
}

/// Renders the human-readable summary.
fn summary_markdown(summary: &TestSummary) -> String {
    let mut out = String::new();
    out.push_str("# Pet Store System-Test Summary\n\n");
    out.push_str("## Status\n\n");
    out.push_str(&format!("- Group: {}\n", summary.test_name));
    out.push_str(&format!("- Status: {}\n", summary.status));
    out.push_str(&format!("- Target: {}\n", summary.base_url));
    out.push_str(&format!("- Duration (ms): {}\n", summary.duration_ms));
    out.push_str("\n## Scenarios\n\n");
    if summary.notes.is_empty() {
        out.push_str("- None\n");
    } else {
        for note in &summary.notes {
            out.push_str(&format!("- {note}\n"));
        }
    }
    out.push_str("\n## Artifacts\n\n");
    if summary.artifacts.is_empty() {
        out.push_str("- None\n");
    } else {
        for artifact in &summary.artifacts {
            out.push_str(&format!("- {artifact}\n"));
        }
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================
