//! Development layer - plans and the policies that choose what they build

pub mod plan;
pub mod policy;

pub use plan::{Plan, PlanStatus, PlanSummary, StepOutcome};
pub use policy::{PolicyKind, SelectionPolicy};
