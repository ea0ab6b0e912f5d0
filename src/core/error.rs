use thiserror::Error;

use crate::core::types::PlanId;
use crate::development::policy::PolicyKind;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Settlement not found: {0}")]
    SettlementNotFound(String),

    #[error("Plan not found: {0}")]
    PlanNotFound(PlanId),

    #[error("Settlement already exists: {0}")]
    DuplicateSettlement(String),

    #[error("Facility already exists: {0}")]
    DuplicateFacility(String),

    #[error("Invalid facility: {0}")]
    InvalidFacility(String),

    #[error("Unknown selection policy: {0}")]
    UnknownPolicy(String),

    #[error("Plan {plan} already uses selection policy {policy}")]
    PolicyUnchanged { plan: PlanId, policy: PolicyKind },

    #[error("Plan {plan} is at construction capacity {capacity}")]
    CapacityExceeded { plan: PlanId, capacity: usize },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error on line {line}: {message}")]
    Config { line: usize, message: String },

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("No backup available")]
    NoBackup,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
