//! Development plans - the per-tick facility construction state machine
//!
//! Each tick runs three ordered stages:
//! 1. Admission: an AVAILABLE plan asks its policy for facilities until the
//!    settlement's construction capacity is filled
//! 2. Progress: every facility under construction advances one tick; the ones
//!    that finish move to `completed` and add their scores
//! 3. Status: BUSY iff construction capacity is still saturated
//!
//! The settlement is shared and immutable; the catalog is borrowed per tick.
//! Cloning a plan deep-copies its facilities and policy state.

use serde::Serialize;
use std::sync::Arc;

use crate::city::facility::{Facility, FacilityStatus, FacilityType};
use crate::city::settlement::Settlement;
use crate::core::error::{Result, SimError};
use crate::core::types::{PlanId, Scores};
use crate::development::policy::{PolicyKind, SelectionPolicy};

/// Whether a plan can admit new facilities on its next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlanStatus {
    Available,
    Busy,
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Available => write!(f, "AVAILABLE"),
            PlanStatus::Busy => write!(f, "BUSY"),
        }
    }
}

/// What happened to a plan during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Facilities started this tick
    pub admitted: usize,
    /// Facilities that became operational this tick
    pub completed: usize,
}

/// A development plan for one settlement
#[derive(Debug, Clone)]
pub struct Plan {
    id: PlanId,
    settlement: Arc<Settlement>,
    policy: SelectionPolicy,
    status: PlanStatus,
    under_construction: Vec<Facility>,
    completed: Vec<Facility>,
    scores: Scores,
}

impl Plan {
    pub fn new(id: PlanId, settlement: Arc<Settlement>, policy: SelectionPolicy) -> Self {
        Self {
            id,
            settlement,
            policy,
            status: PlanStatus::Available,
            under_construction: Vec::new(),
            completed: Vec::new(),
            scores: Scores::default(),
        }
    }

    /// Advance the plan by one tick
    pub fn step(&mut self, catalog: &[FacilityType]) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        let capacity = self.capacity();

        if self.status == PlanStatus::Available {
            while self.under_construction.len() < capacity {
                let Some(chosen) = self.policy.select_facility(catalog) else {
                    tracing::debug!(plan = %self.id, "catalog empty; nothing to admit");
                    break;
                };
                tracing::debug!(
                    plan = %self.id,
                    facility = chosen.name(),
                    "construction started"
                );
                self.file_facility(Facility::new(chosen.clone(), self.settlement.name()));
                outcome.admitted += 1;
            }
        }

        // Take the list so every facility is visited exactly once while the
        // finished ones are re-filed as completed.
        for mut facility in std::mem::take(&mut self.under_construction) {
            if facility.step() == FacilityStatus::Operational {
                tracing::debug!(
                    plan = %self.id,
                    facility = facility.name(),
                    "facility operational"
                );
                outcome.completed += 1;
            }
            self.file_facility(facility);
        }

        self.refresh_status();
        outcome
    }

    /// Add a facility outside of a tick
    ///
    /// Operational facilities add their scores immediately. An
    /// under-construction facility is rejected once construction capacity is
    /// full. The plan status is recomputed afterwards.
    pub fn add_facility(&mut self, facility: Facility) -> Result<()> {
        let capacity = self.capacity();
        if !facility.is_operational() && self.under_construction.len() >= capacity {
            return Err(SimError::CapacityExceeded {
                plan: self.id,
                capacity,
            });
        }
        self.file_facility(facility);
        self.refresh_status();
        Ok(())
    }

    fn file_facility(&mut self, facility: Facility) {
        match facility.status() {
            FacilityStatus::UnderConstruction => self.under_construction.push(facility),
            FacilityStatus::Operational => {
                self.scores += facility.scores();
                self.completed.push(facility);
            }
        }
    }

    /// BUSY iff construction capacity is saturated
    fn refresh_status(&mut self) {
        self.status = if self.under_construction.len() == self.capacity() {
            PlanStatus::Busy
        } else {
            PlanStatus::Available
        };
    }

    /// Replace the selection policy; facilities and scores are untouched
    pub fn set_selection_policy(&mut self, policy: SelectionPolicy) {
        self.policy = policy;
    }

    pub fn id(&self) -> PlanId {
        self.id
    }

    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }

    pub fn status(&self) -> PlanStatus {
        self.status
    }

    pub fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn quality_score(&self) -> i64 {
        self.scores.quality
    }

    pub fn economy_score(&self) -> i64 {
        self.scores.economy
    }

    pub fn environment_score(&self) -> i64 {
        self.scores.environment
    }

    pub fn under_construction(&self) -> &[Facility] {
        &self.under_construction
    }

    pub fn completed(&self) -> &[Facility] {
        &self.completed
    }

    /// Facilities that may be under construction at once
    pub fn capacity(&self) -> usize {
        self.settlement.construction_capacity()
    }

    /// Detailed report: status, policy, scores, then every facility
    pub fn status_report(&self) -> String {
        let mut report = format!(
            "PlanID: {}\nSettlementName: {}\nStatus: {}\nSelectionPolicy: {}\n{}",
            self.id,
            self.settlement.name(),
            self.status,
            self.policy_kind(),
            self.score_lines()
        );
        for facility in self.under_construction.iter().chain(&self.completed) {
            report.push_str(&facility.to_string());
            report.push('\n');
        }
        report
    }

    /// Summary report: scores only
    pub fn summary_report(&self) -> String {
        format!(
            "PlanID: {}\nSettlementName: {}\n{}",
            self.id,
            self.settlement.name(),
            self.score_lines()
        )
    }

    fn score_lines(&self) -> String {
        format!(
            "LifeQualityScore: {}\nEconomyScore: {}\nEnvironmentScore: {}\n",
            self.scores.quality, self.scores.economy, self.scores.environment
        )
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            id: self.id,
            settlement: self.settlement.name().to_string(),
            policy: self.policy_kind(),
            status: self.status,
            scores: self.scores,
            under_construction: self.under_construction.len(),
            completed: self.completed.len(),
        }
    }
}

/// Serializable snapshot of a plan's headline numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub id: PlanId,
    pub settlement: String,
    pub policy: PolicyKind,
    pub status: PlanStatus,
    pub scores: Scores,
    pub under_construction: usize,
    pub completed: usize,
}
