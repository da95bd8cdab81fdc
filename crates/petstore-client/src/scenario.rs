// crates/petstore-client/src/scenario.rs
// ============================================================================
// Module: Scenario Runner
// Description: Ordered execution of request-and-expect scenarios.
// Purpose: Run a resource group in declared order and report every outcome.
// Dependencies: serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! A [`ScenarioGroup`] runs one resource group (pets, users, or orders)
//! strictly in the order scenarios are submitted: each [`ScenarioGroup::run`]
//! call awaits its scenario to completion before returning, so scenario N
//! can never start before scenario N-1 finished. A failing scenario does not
//! stop the group; later scenarios still run, as independent test cases do.
//!
//! Dependencies on earlier scenarios are declared with [`Scenario::after`].
//! A dependency must name a scenario that already ran in the same group,
//! otherwise the scenario is rejected without dispatching anything. When a
//! dependency ran but did not pass, the record lists it under `blocked_by`
//! so a cascade of failures traces back to its first cause.
//!
//! Known discrepancies keep the documented expectation. An expectation
//! failure in such a scenario is recorded as reproduced rather than failed;
//! a pass is recorded as resolved. Whether a reproduced discrepancy fails the
//! group is the caller's choice in [`GroupReport::verdict`].

use std::future::Future;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use crate::client::ApiClient;
use crate::error::PetstoreError;

// ============================================================================
// SECTION: Scenario Definitions
// ============================================================================

/// How a scenario's result is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScenarioKind {
    /// The service is expected to honor the documented contract.
    Contract,
    /// The service is known to violate the documented contract.
    KnownDiscrepancy {
        /// What the live service is observed to do instead.
        observed: &'static str,
    },
}

/// Declared scenario metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    /// Stable identifier, unique within a group.
    name: &'static str,
    /// Endpoint and intent, e.g. `POST /pet adds a new pet`.
    title: &'static str,
    /// Judging mode.
    kind: ScenarioKind,
    /// Earlier scenarios whose side effects this one relies on.
    depends_on: Vec<&'static str>,
}

impl Scenario {
    /// Declares a scenario expected to pass.
    #[must_use]
    pub const fn contract(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            kind: ScenarioKind::Contract,
            depends_on: Vec::new(),
        }
    }

    /// Declares a scenario documenting a known contract violation.
    #[must_use]
    pub const fn known_discrepancy(
        name: &'static str,
        title: &'static str,
        observed: &'static str,
    ) -> Self {
        Self {
            name,
            title,
            kind: ScenarioKind::KnownDiscrepancy {
                observed,
            },
            depends_on: Vec::new(),
        }
    }

    /// Declares a dependency on an earlier scenario.
    #[must_use]
    pub fn after(mut self, earlier: &'static str) -> Self {
        self.depends_on.push(earlier);
        self
    }

    /// Returns the scenario name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the judging mode.
    #[must_use]
    pub const fn kind(&self) -> ScenarioKind {
        self.kind
    }
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Result of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScenarioOutcome {
    /// Contract honored.
    Passed,
    /// Contract broken, dispatch failed, or the scenario was rejected.
    Failed {
        /// Error category label.
        error_kind: &'static str,
        /// Error detail.
        error: String,
    },
    /// A known discrepancy showed up again.
    DiscrepancyReproduced {
        /// Expectation failure detail.
        error: String,
    },
    /// A known discrepancy no longer shows up.
    DiscrepancyResolved,
}

impl ScenarioOutcome {
    /// Judges an action result under a scenario kind.
    fn judge(kind: ScenarioKind, result: Result<(), PetstoreError>) -> Self {
        match (kind, result) {
            (ScenarioKind::Contract, Ok(())) => Self::Passed,
            (ScenarioKind::KnownDiscrepancy { .. }, Ok(())) => Self::DiscrepancyResolved,
            (ScenarioKind::KnownDiscrepancy { .. }, Err(err)) if err.is_expectation() => {
                Self::DiscrepancyReproduced {
                    error: err.to_string(),
                }
            }
            (_, Err(err)) => Self::Failed {
                error_kind: err.kind(),
                error: err.to_string(),
            },
        }
    }

    /// Returns true when the documented expectation held.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Passed | Self::DiscrepancyResolved)
    }
}

/// Report entry for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioRecord {
    /// 1-based execution position.
    pub sequence: usize,
    /// Scenario name.
    pub name: &'static str,
    /// Scenario title.
    pub title: &'static str,
    /// Judging mode.
    pub kind: ScenarioKind,
    /// Declared dependencies.
    pub depends_on: Vec<&'static str>,
    /// Declared dependencies that ran but did not pass.
    pub blocked_by: Vec<&'static str>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Result.
    pub outcome: ScenarioOutcome,
}

// ============================================================================
// SECTION: Group Runner
// ============================================================================

/// Ordered runner for one resource group.
#[derive(Debug)]
pub struct ScenarioGroup {
    /// Group name, e.g. `pet`.
    name: String,
    /// Client handed to every scenario.
    client: ApiClient,
    /// Completed scenarios in execution order.
    records: Vec<ScenarioRecord>,
}

impl ScenarioGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: &str, client: ApiClient) -> Self {
        Self {
            name: name.to_string(),
            client,
            records: Vec::new(),
        }
    }

    /// Returns the shared client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Returns the records completed so far.
    #[must_use]
    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }

    /// Runs one scenario to completion and records its outcome.
    ///
    /// The action receives a clone of the group client; clones share the
    /// transcript.
    pub async fn run<F, Fut>(&mut self, scenario: Scenario, action: F) -> &ScenarioRecord
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<(), PetstoreError>>,
    {
        let started = Instant::now();
        let outcome = match self.check_order(&scenario) {
            Ok(()) => {
                tracing::debug!(group = %self.name, scenario = scenario.name, "scenario started");
                ScenarioOutcome::judge(scenario.kind, action(self.client.clone()).await)
            }
            Err(err) => ScenarioOutcome::judge(ScenarioKind::Contract, Err(err)),
        };
        let blocked_by = scenario
            .depends_on
            .iter()
            .copied()
            .filter(|dependency| {
                self.records
                    .iter()
                    .find(|record| record.name == *dependency)
                    .is_some_and(|record| !record.outcome.is_pass())
            })
            .collect();
        self.log_outcome(&scenario, &outcome);
        self.records.push(ScenarioRecord {
            sequence: self.records.len().saturating_add(1),
            name: scenario.name,
            title: scenario.title,
            kind: scenario.kind,
            depends_on: scenario.depends_on,
            blocked_by,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            outcome,
        });
        let last = self.records.len().saturating_sub(1);
        &self.records[last]
    }

    /// Finishes the group and returns its report.
    #[must_use]
    pub fn finish(self) -> GroupReport {
        GroupReport {
            group: self.name,
            scenarios: self.records,
        }
    }

    /// Rejects duplicate names and dependencies that have not run yet.
    fn check_order(&self, scenario: &Scenario) -> Result<(), PetstoreError> {
        if self.records.iter().any(|record| record.name == scenario.name) {
            return Err(PetstoreError::Ordering(format!(
                "scenario {} declared twice in group {}",
                scenario.name, self.name
            )));
        }
        for dependency in &scenario.depends_on {
            if !self.records.iter().any(|record| record.name == *dependency) {
                return Err(PetstoreError::Ordering(format!(
                    "scenario {} depends on {dependency}, which has not run in group {}",
                    scenario.name, self.name
                )));
            }
        }
        Ok(())
    }

    /// Emits one log line per finished scenario.
    fn log_outcome(&self, scenario: &Scenario, outcome: &ScenarioOutcome) {
        match outcome {
            ScenarioOutcome::Passed => {
                tracing::info!(group = %self.name, scenario = scenario.name, "scenario passed");
            }
            ScenarioOutcome::Failed {
                error, ..
            } => {
                tracing::error!(group = %self.name, scenario = scenario.name, %error, "scenario failed");
            }
            ScenarioOutcome::DiscrepancyReproduced {
                error,
            } => {
                tracing::warn!(
                    group = %self.name,
                    scenario = scenario.name,
                    %error,
                    "known discrepancy reproduced"
                );
            }
            ScenarioOutcome::DiscrepancyResolved => {
                tracing::info!(
                    group = %self.name,
                    scenario = scenario.name,
                    "known discrepancy no longer reproduces"
                );
            }
        }
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Failure summary returned by [`GroupReport::verdict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("group {group}: {} scenario(s) failed: {}", .failed.len(), .failed.join(", "))]
pub struct GroupFailure {
    /// Group name.
    pub group: String,
    /// Names of failing scenarios in execution order.
    pub failed: Vec<&'static str>,
}

/// Outcome of a finished group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    /// Group name.
    pub group: String,
    /// Records in execution order.
    pub scenarios: Vec<ScenarioRecord>,
}

impl GroupReport {
    /// Returns records with a given outcome predicate.
    fn matching(&self, predicate: impl Fn(&ScenarioOutcome) -> bool) -> Vec<&ScenarioRecord> {
        self.scenarios.iter().filter(|record| predicate(&record.outcome)).collect()
    }

    /// Returns scenarios that failed outright.
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioRecord> {
        self.matching(|outcome| matches!(outcome, ScenarioOutcome::Failed { .. }))
    }

    /// Returns known discrepancies that showed up again.
    #[must_use]
    pub fn reproduced_discrepancies(&self) -> Vec<&ScenarioRecord> {
        self.matching(|outcome| matches!(outcome, ScenarioOutcome::DiscrepancyReproduced { .. }))
    }

    /// Returns known discrepancies that no longer show up.
    #[must_use]
    pub fn resolved_discrepancies(&self) -> Vec<&ScenarioRecord> {
        self.matching(|outcome| matches!(outcome, ScenarioOutcome::DiscrepancyResolved))
    }

    /// Returns one note line per scenario for human-readable summaries.
    #[must_use]
    pub fn notes(&self) -> Vec<String> {
        self.scenarios
            .iter()
            .map(|record| {
                let label = match &record.outcome {
                    ScenarioOutcome::Passed => "passed".to_string(),
                    ScenarioOutcome::Failed {
                        error, ..
                    } => format!("FAILED: {error}"),
                    ScenarioOutcome::DiscrepancyReproduced {
                        ..
                    } => match record.kind {
                        ScenarioKind::KnownDiscrepancy {
                            observed,
                        } => format!("known discrepancy reproduced ({observed})"),
                        ScenarioKind::Contract => "known discrepancy reproduced".to_string(),
                    },
                    ScenarioOutcome::DiscrepancyResolved => {
                        "known discrepancy resolved: documented contract now holds".to_string()
                    }
                };
                format!("{:02} {}: {label}", record.sequence, record.name)
            })
            .collect()
    }

    /// Decides whether the group passed.
    ///
    /// Outright failures always fail the group. Reproduced discrepancies fail
    /// it only when `strict` is set.
    ///
    /// # Errors
    ///
    /// Returns [`GroupFailure`] naming every failing scenario.
    pub fn verdict(&self, strict: bool) -> Result<(), GroupFailure> {
        let failed: Vec<&'static str> = self
            .scenarios
            .iter()
            .filter(|record| match record.outcome {
                ScenarioOutcome::Failed { .. } => true,
                ScenarioOutcome::DiscrepancyReproduced { .. } => strict,
                ScenarioOutcome::Passed | ScenarioOutcome::DiscrepancyResolved => false,
            })
            .map(|record| record.name)
            .collect();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(GroupFailure {
                group: self.group.clone(),
                failed,
            })
        }
    }
}
