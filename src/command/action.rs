//! Commands accepted by the simulation and the action log they produce

use serde::Serialize;

use crate::city::facility::FacilityCategory;
use crate::city::settlement::SettlementType;
use crate::core::types::{PlanId, Scores};

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Advance every plan `steps` ticks
    Step { steps: u32 },
    /// Create a plan; the policy stays raw text until execution
    AddPlan { settlement: String, policy: String },
    AddSettlement { name: String, kind: SettlementType },
    AddFacility {
        name: String,
        category: FacilityCategory,
        cost: u32,
        scores: Scores,
    },
    PlanStatus { plan: PlanId },
    ChangePolicy { plan: PlanId, policy: String },
    /// Print the action log
    Log,
    /// Print every plan summary and stop
    Close,
    Backup,
    Restore,
}

impl Command {
    /// `log` and `close` are never recorded in the action log
    pub fn is_logged(&self) -> bool {
        !matches!(self, Command::Log | Command::Close)
    }

    /// Commands allowed in a line-format scenario file
    pub fn is_scenario_entry(&self) -> bool {
        matches!(
            self,
            Command::AddSettlement { .. } | Command::AddFacility { .. } | Command::AddPlan { .. }
        )
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Step { steps } => write!(f, "step {}", steps),
            Command::AddPlan { settlement, policy } => write!(f, "plan {} {}", settlement, policy),
            Command::AddSettlement { name, kind } => {
                write!(f, "settlement {} {}", name, kind.code())
            }
            Command::AddFacility {
                name,
                category,
                cost,
                scores,
            } => write!(
                f,
                "facility {} {} {} {} {} {}",
                name,
                category.code(),
                cost,
                scores.quality,
                scores.economy,
                scores.environment
            ),
            Command::PlanStatus { plan } => write!(f, "planStatus {}", plan),
            Command::ChangePolicy { plan, policy } => write!(f, "changePolicy {} {}", plan, policy),
            Command::Log => write!(f, "log"),
            Command::Close => write!(f, "close"),
            Command::Backup => write!(f, "backup"),
            Command::Restore => write!(f, "restore"),
        }
    }
}

/// Outcome of an executed command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionStatus {
    Completed,
    Error,
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionStatus::Completed => write!(f, "COMPLETED"),
            ActionStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// One entry of the action log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub command: Command,
    pub status: ActionStatus,
    /// Error message when `status` is `Error`
    pub error: Option<String>,
}

impl ActionRecord {
    pub fn completed(command: Command) -> Self {
        Self {
            command,
            status: ActionStatus::Completed,
            error: None,
        }
    }

    pub fn failed(command: Command, error: impl Into<String>) -> Self {
        Self {
            command,
            status: ActionStatus::Error,
            error: Some(error.into()),
        }
    }
}

impl std::fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.command, self.status)
    }
}
