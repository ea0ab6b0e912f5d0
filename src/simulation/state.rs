//! Whole-simulation state: registries, plans, and the action log
//!
//! `Clone` is the snapshot primitive. Plans deep-copy their facilities and
//! policy state; settlements are immutable and shared through `Arc`.

use ahash::AHashMap;
use rayon::prelude::*;
use std::sync::Arc;

use crate::city::catalog::FacilityCatalog;
use crate::city::facility::FacilityType;
use crate::city::settlement::Settlement;
use crate::command::action::ActionRecord;
use crate::core::error::{Result, SimError};
use crate::core::types::{PlanId, Scores, Tick};
use crate::development::plan::Plan;
use crate::development::policy::{PolicyKind, SelectionPolicy};

#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    settlements: Vec<Arc<Settlement>>,
    settlement_index: AHashMap<String, usize>,
    catalog: FacilityCatalog,
    plans: Vec<Plan>,
    next_plan_id: u32,
    actions_log: Vec<ActionRecord>,
    current_tick: Tick,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_settlement(&mut self, settlement: Settlement) -> Result<()> {
        if self.settlement_index.contains_key(settlement.name()) {
            return Err(SimError::DuplicateSettlement(settlement.name().to_string()));
        }
        self.settlement_index
            .insert(settlement.name().to_string(), self.settlements.len());
        self.settlements.push(Arc::new(settlement));
        Ok(())
    }

    pub fn settlement(&self, name: &str) -> Result<&Arc<Settlement>> {
        self.settlement_index
            .get(name)
            .map(|&idx| &self.settlements[idx])
            .ok_or_else(|| SimError::SettlementNotFound(name.to_string()))
    }

    pub fn settlements(&self) -> impl Iterator<Item = &Settlement> + '_ {
        self.settlements.iter().map(|s| s.as_ref())
    }

    pub fn add_facility_type(&mut self, facility_type: FacilityType) -> Result<()> {
        self.catalog.add(facility_type)
    }

    pub fn catalog(&self) -> &FacilityCatalog {
        &self.catalog
    }

    /// Create a plan for an existing settlement with a fresh id
    pub fn add_plan(&mut self, settlement_name: &str, kind: PolicyKind) -> Result<PlanId> {
        let settlement = Arc::clone(self.settlement(settlement_name)?);
        let id = PlanId::new(self.next_plan_id);
        // A new plan has no scores yet, so a balanced policy starts from zero
        let policy = SelectionPolicy::new(kind, Scores::default());
        self.plans.push(Plan::new(id, settlement, policy));
        self.next_plan_id += 1;
        Ok(id)
    }

    pub fn plan(&self, id: PlanId) -> Result<&Plan> {
        self.plans
            .get(id.index())
            .ok_or(SimError::PlanNotFound(id))
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Swap a plan's policy, returning the kind it replaced
    ///
    /// A balanced policy is seeded with the plan's current scores.
    pub fn change_policy(&mut self, id: PlanId, kind: PolicyKind) -> Result<PolicyKind> {
        let plan = self
            .plans
            .get_mut(id.index())
            .ok_or(SimError::PlanNotFound(id))?;
        let previous = plan.policy_kind();
        if previous == kind {
            return Err(SimError::PolicyUnchanged {
                plan: id,
                policy: kind,
            });
        }
        plan.set_selection_policy(SelectionPolicy::new(kind, plan.scores()));
        Ok(previous)
    }

    /// Advance every plan by one tick, returning how many facilities finished
    ///
    /// Plans only read the catalog, so the parallel path is equivalent.
    pub fn tick(&mut self, parallel: bool) -> usize {
        let catalog = self.catalog.all();
        let completed = if parallel {
            self.plans
                .par_iter_mut()
                .map(|plan| plan.step(catalog).completed)
                .sum::<usize>()
        } else {
            self.plans
                .iter_mut()
                .map(|plan| plan.step(catalog).completed)
                .sum::<usize>()
        };
        self.current_tick += 1;
        completed
    }

    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn record_action(&mut self, record: ActionRecord) {
        self.actions_log.push(record);
    }

    pub fn actions_log(&self) -> &[ActionRecord] {
        &self.actions_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::facility::FacilityCategory;
    use crate::city::settlement::SettlementType;

    fn seeded() -> SimulationState {
        let mut state = SimulationState::new();
        state
            .add_settlement(Settlement::new("Kfar", SettlementType::Village))
            .unwrap();
        state
            .add_facility_type(
                FacilityType::new("park", FacilityCategory::Environment, 1, Scores::new(1, 0, 3))
                    .unwrap(),
            )
            .unwrap();
        state
    }

    #[test]
    fn test_duplicate_settlement_keeps_original() {
        let mut state = seeded();
        let result = state.add_settlement(Settlement::new("Kfar", SettlementType::Metropolis));

        assert!(matches!(result, Err(SimError::DuplicateSettlement(_))));
        assert_eq!(state.settlement("Kfar").unwrap().kind(), SettlementType::Village);
        assert_eq!(state.settlements().count(), 1);
    }

    #[test]
    fn test_plan_ids_are_sequential() {
        let mut state = seeded();
        assert_eq!(state.add_plan("Kfar", PolicyKind::Naive).unwrap(), PlanId(0));
        assert_eq!(state.add_plan("Kfar", PolicyKind::Economy).unwrap(), PlanId(1));
        assert_eq!(state.plan(PlanId(1)).unwrap().policy_kind(), PolicyKind::Economy);
    }

    #[test]
    fn test_add_plan_unknown_settlement() {
        let mut state = seeded();
        let result = state.add_plan("Nowhere", PolicyKind::Naive);
        assert!(matches!(result, Err(SimError::SettlementNotFound(name)) if name == "Nowhere"));
        assert!(state.plans().is_empty());
    }

    #[test]
    fn test_change_policy_seeds_balanced_with_scores() {
        let mut state = seeded();
        let id = state.add_plan("Kfar", PolicyKind::Naive).unwrap();
        state.tick(false);

        let previous = state.change_policy(id, PolicyKind::Balanced).unwrap();

        assert_eq!(previous, PolicyKind::Naive);
        assert_eq!(
            state.plan(id).unwrap().policy(),
            &SelectionPolicy::Balanced {
                totals: Scores::new(1, 0, 3)
            }
        );
    }

    #[test]
    fn test_change_policy_rejects_same_kind() {
        let mut state = seeded();
        let id = state.add_plan("Kfar", PolicyKind::Naive).unwrap();
        assert!(matches!(
            state.change_policy(id, PolicyKind::Naive),
            Err(SimError::PolicyUnchanged { .. })
        ));
        assert!(matches!(
            state.change_policy(PlanId(9), PolicyKind::Economy),
            Err(SimError::PlanNotFound(PlanId(9)))
        ));
    }

    #[test]
    fn test_parallel_tick_matches_sequential() {
        let mut sequential = seeded();
        for _ in 0..8 {
            sequential.add_plan("Kfar", PolicyKind::Balanced).unwrap();
        }
        let mut parallel = sequential.clone();

        for _ in 0..5 {
            assert_eq!(sequential.tick(false), parallel.tick(true));
        }
        for (a, b) in sequential.plans().iter().zip(parallel.plans()) {
            assert_eq!(a.scores(), b.scores());
            assert_eq!(a.completed().len(), b.completed().len());
        }
        assert_eq!(parallel.current_tick(), 5);
    }
}
