//! Simulation orchestrator
//!
//! Owns the live state, the engine config, and at most one snapshot.

pub mod loader;
pub mod state;

pub use loader::{load_scenario, parse_scenario_lines, parse_scenario_toml};
pub use state::SimulationState;

use crate::city::catalog::FacilityCatalog;
use crate::city::facility::FacilityType;
use crate::city::settlement::Settlement;
use crate::command::action::ActionRecord;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{PlanId, Tick};
use crate::development::plan::{Plan, PlanSummary};
use crate::development::policy::PolicyKind;

/// The running simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    state: SimulationState,
    backup: Option<SimulationState>,
    running: bool,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate().map_err(SimError::InvalidConfig)?;
        Ok(Self {
            config,
            state: SimulationState::new(),
            backup: None,
            running: true,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn add_settlement(&mut self, settlement: Settlement) -> Result<()> {
        let description = settlement.to_string();
        self.state.add_settlement(settlement)?;
        tracing::info!(settlement = %description, "settlement registered");
        Ok(())
    }

    pub fn settlement(&self, name: &str) -> Result<&Settlement> {
        self.state.settlement(name).map(|s| s.as_ref())
    }

    pub fn settlements(&self) -> impl Iterator<Item = &Settlement> + '_ {
        self.state.settlements()
    }

    pub fn add_facility_type(&mut self, facility_type: FacilityType) -> Result<()> {
        let name = facility_type.name().to_string();
        self.state.add_facility_type(facility_type)?;
        tracing::info!(facility = %name, "facility type registered");
        Ok(())
    }

    pub fn catalog(&self) -> &FacilityCatalog {
        self.state.catalog()
    }

    pub fn add_plan(&mut self, settlement_name: &str, kind: PolicyKind) -> Result<PlanId> {
        let id = self.state.add_plan(settlement_name, kind)?;
        tracing::info!(plan = %id, settlement = settlement_name, policy = %kind, "plan created");
        Ok(id)
    }

    pub fn plan(&self, id: PlanId) -> Result<&Plan> {
        self.state.plan(id)
    }

    pub fn plans(&self) -> &[Plan] {
        self.state.plans()
    }

    /// Replace a plan's policy; returns the previous policy kind
    pub fn change_policy(&mut self, id: PlanId, kind: PolicyKind) -> Result<PolicyKind> {
        let previous = self.state.change_policy(id, kind)?;
        tracing::info!(plan = %id, from = %previous, to = %kind, "selection policy changed");
        Ok(previous)
    }

    /// Advance every plan `steps` times
    ///
    /// Every plan finishes tick k before any plan starts tick k+1.
    pub fn step(&mut self, steps: u32) {
        for _ in 0..steps {
            let parallel = self.config.use_parallel(self.state.plans().len());
            let completed = self.state.tick(parallel);
            tracing::debug!(
                tick = self.state.current_tick(),
                completed,
                parallel,
                "tick complete"
            );
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.state.current_tick()
    }

    /// Capture the whole state, discarding any earlier snapshot
    pub fn backup(&mut self) {
        self.backup = Some(self.state.clone());
        tracing::info!(tick = self.state.current_tick(), "snapshot taken");
    }

    pub fn has_backup(&self) -> bool {
        self.backup.is_some()
    }

    /// Reinstate the snapshot; it stays available for later restores
    pub fn restore(&mut self) -> Result<()> {
        let snapshot = self.backup.as_ref().ok_or(SimError::NoBackup)?;
        self.state = snapshot.clone();
        tracing::info!(tick = self.state.current_tick(), "snapshot restored");
        Ok(())
    }

    pub fn record_action(&mut self, record: ActionRecord) {
        self.state.record_action(record);
    }

    pub fn actions_log(&self) -> &[ActionRecord] {
        self.state.actions_log()
    }

    pub fn summaries(&self) -> Vec<PlanSummary> {
        self.state.plans().iter().map(Plan::summary).collect()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn close(&mut self) {
        self.running = false;
        tracing::info!(plans = self.state.plans().len(), "simulation closed");
    }
}
