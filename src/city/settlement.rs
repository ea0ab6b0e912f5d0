//! Settlements - named places that development plans build for

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Size class of a settlement
///
/// The numeric value doubles as the config-file code and bounds how many
/// facilities a plan may have under construction at once (`code + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum SettlementType {
    Village = 0,
    City = 1,
    Metropolis = 2,
}

impl SettlementType {
    /// Parse the numeric code used by scenario files and commands
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(SettlementType::Village),
            1 => Ok(SettlementType::City),
            2 => Ok(SettlementType::Metropolis),
            other => Err(SimError::Parse(format!("invalid settlement type: {}", other))),
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Maximum number of facilities a plan may build concurrently
    pub fn construction_capacity(&self) -> usize {
        self.code() as usize + 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            SettlementType::Village => "village",
            SettlementType::City => "city",
            SettlementType::Metropolis => "metropolis",
        }
    }
}

/// An immutable named settlement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settlement {
    name: String,
    kind: SettlementType,
}

impl Settlement {
    pub fn new(name: impl Into<String>, kind: SettlementType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SettlementType {
        self.kind
    }

    pub fn construction_capacity(&self) -> usize {
        self.kind.construction_capacity()
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} is a {}", self.name, self.kind.name())
    }
}
