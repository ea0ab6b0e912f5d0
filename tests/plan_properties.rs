//! Property tests for plans, policies and facility progress

use std::sync::Arc;

use proptest::prelude::*;

use settlement_sim::city::facility::{Facility, FacilityCategory, FacilityStatus, FacilityType};
use settlement_sim::city::settlement::{Settlement, SettlementType};
use settlement_sim::core::types::{PlanId, Scores};
use settlement_sim::development::plan::{Plan, PlanStatus};
use settlement_sim::development::policy::{PolicyKind, SelectionPolicy};

fn category_strategy() -> impl Strategy<Value = FacilityCategory> {
    prop_oneof![
        Just(FacilityCategory::Quality),
        Just(FacilityCategory::Economy),
        Just(FacilityCategory::Environment),
    ]
}

fn settlement_type_strategy() -> impl Strategy<Value = SettlementType> {
    prop_oneof![
        Just(SettlementType::Village),
        Just(SettlementType::City),
        Just(SettlementType::Metropolis),
    ]
}

fn policy_strategy() -> impl Strategy<Value = PolicyKind> {
    prop_oneof![
        Just(PolicyKind::Naive),
        Just(PolicyKind::Balanced),
        Just(PolicyKind::Economy),
        Just(PolicyKind::Environment),
    ]
}

fn catalog_strategy() -> impl Strategy<Value = Vec<FacilityType>> {
    prop::collection::vec(
        (category_strategy(), 1_u32..6, -5_i64..=5, -5_i64..=5, -5_i64..=5),
        1..8,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (category, cost, q, e, v))| {
                FacilityType::new(format!("f{}", i), category, cost, Scores::new(q, e, v))
                    .expect("cost is positive")
            })
            .collect()
    })
}

fn new_plan(kind: SettlementType, policy: PolicyKind) -> Plan {
    Plan::new(
        PlanId(0),
        Arc::new(Settlement::new("Prop", kind)),
        SelectionPolicy::new(policy, Scores::default()),
    )
}

proptest! {
    #[test]
    fn property_capacity_and_scores_hold_every_tick(
        catalog in catalog_strategy(),
        kind in settlement_type_strategy(),
        policy in policy_strategy(),
        ticks in 1_usize..40,
    ) {
        let mut plan = new_plan(kind, policy);
        for _ in 0..ticks {
            plan.step(&catalog);

            let in_progress = plan.under_construction().len();
            prop_assert!(in_progress <= kind.construction_capacity());
            prop_assert_eq!(
                plan.status() == PlanStatus::Busy,
                in_progress == kind.construction_capacity()
            );

            let sum = plan
                .completed()
                .iter()
                .fold(Scores::default(), |acc, f| acc + f.scores());
            prop_assert_eq!(plan.scores(), sum);
            prop_assert!(plan.completed().iter().all(|f| f.is_operational()));
            prop_assert!(plan.under_construction().iter().all(|f| f.time_left() > 0));
        }
    }

    #[test]
    fn property_naive_cycles_in_catalog_order(
        catalog in catalog_strategy(),
        start in 0_usize..20,
        picks in 1_usize..30,
    ) {
        let mut policy = SelectionPolicy::Naive { next: start };
        for i in 0..picks {
            let chosen = policy.select_facility(&catalog).expect("catalog is not empty");
            prop_assert_eq!(chosen.name(), catalog[(start + i) % catalog.len()].name());
        }
    }

    #[test]
    fn property_balanced_picks_lowest_index_minimum(
        catalog in catalog_strategy(),
        q in -10_i64..=10,
        e in -10_i64..=10,
        v in -10_i64..=10,
    ) {
        let totals = Scores::new(q, e, v);
        let mut policy = SelectionPolicy::new(PolicyKind::Balanced, totals);
        let chosen = policy.select_facility(&catalog).expect("catalog is not empty");

        let spreads: Vec<i64> = catalog
            .iter()
            .map(|f| (totals + f.scores()).imbalance())
            .collect();
        let best = spreads.iter().copied().min().unwrap_or(0);
        let first_best = spreads.iter().position(|&s| s == best).unwrap_or(0);

        prop_assert_eq!(chosen.name(), catalog[first_best].name());
        prop_assert_eq!(
            policy,
            SelectionPolicy::Balanced { totals: totals + catalog[first_best].scores() }
        );
    }

    #[test]
    fn property_focused_policy_prefers_its_category(
        catalog in catalog_strategy(),
        picks in 1_usize..20,
    ) {
        for (kind, category) in [
            (PolicyKind::Economy, FacilityCategory::Economy),
            (PolicyKind::Environment, FacilityCategory::Environment),
        ] {
            let available = catalog.iter().any(|f| f.category() == category);
            let mut policy = SelectionPolicy::new(kind, Scores::default());
            for _ in 0..picks {
                let chosen = policy.select_facility(&catalog).expect("catalog is not empty");
                if available {
                    prop_assert_eq!(chosen.category(), category);
                }
            }
        }
    }

    #[test]
    fn property_time_left_strictly_decreases(cost in 1_u32..50) {
        let kind = FacilityType::new("Hall", FacilityCategory::Quality, cost, Scores::default())
            .expect("cost is positive");
        let mut facility = Facility::new(kind, "Prop");

        let mut previous = facility.time_left();
        while facility.status() == FacilityStatus::UnderConstruction {
            facility.step();
            prop_assert!(facility.time_left() < previous);
            previous = facility.time_left();
        }
        prop_assert_eq!(facility.time_left(), 0);

        facility.step();
        prop_assert_eq!(facility.time_left(), 0);
        prop_assert!(facility.is_operational());
    }

    #[test]
    fn property_clone_is_isolated(
        catalog in catalog_strategy(),
        kind in settlement_type_strategy(),
        policy in policy_strategy(),
        before in 0_usize..10,
        after in 1_usize..20,
    ) {
        let mut original = new_plan(kind, policy);
        for _ in 0..before {
            original.step(&catalog);
        }
        let snapshot = original.summary();
        let report = original.status_report();
        let policy_state = original.policy().clone();

        let mut copy = original.clone();
        for _ in 0..after {
            copy.step(&catalog);
        }

        prop_assert_eq!(original.summary(), snapshot);
        prop_assert_eq!(original.status_report(), report);
        prop_assert_eq!(original.policy(), &policy_state);
    }
}
