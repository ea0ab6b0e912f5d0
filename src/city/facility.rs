//! Facility catalog entries and the facilities plans construct from them

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Scores;

/// Category a facility type belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FacilityCategory {
    Quality = 0,
    Economy = 1,
    Environment = 2,
}

impl FacilityCategory {
    /// Parse the numeric code used by scenario files and commands
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            0 => Ok(FacilityCategory::Quality),
            1 => Ok(FacilityCategory::Economy),
            2 => Ok(FacilityCategory::Environment),
            other => Err(SimError::Parse(format!("invalid facility category: {}", other))),
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// Immutable description of a kind of facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityType {
    name: String,
    category: FacilityCategory,
    cost: u32,
    scores: Scores,
}

impl FacilityType {
    /// Create a facility type; construction must take at least one tick
    pub fn new(
        name: impl Into<String>,
        category: FacilityCategory,
        cost: u32,
        scores: Scores,
    ) -> Result<Self> {
        let name = name.into();
        if cost == 0 {
            return Err(SimError::InvalidFacility(format!(
                "{} must cost at least 1",
                name
            )));
        }
        Ok(Self {
            name,
            category,
            cost,
            scores,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> FacilityCategory {
        self.category
    }

    /// Ticks of construction needed before the facility is operational
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }
}

/// Construction state of a facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacilityStatus {
    /// Still being built - contributes nothing
    UnderConstruction,
    /// Finished; terminal
    Operational,
}

impl std::fmt::Display for FacilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FacilityStatus::UnderConstruction => write!(f, "UNDER_CONSTRUCTION"),
            FacilityStatus::Operational => write!(f, "OPERATIONAL"),
        }
    }
}

/// A facility type being built (or already built) for one settlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    facility_type: FacilityType,
    settlement_name: String,
    status: FacilityStatus,
    time_left: u32,
}

impl Facility {
    /// Start construction of `facility_type` in the named settlement
    pub fn new(facility_type: FacilityType, settlement_name: impl Into<String>) -> Self {
        let time_left = facility_type.cost();
        Self {
            facility_type,
            settlement_name: settlement_name.into(),
            status: FacilityStatus::UnderConstruction,
            time_left,
        }
    }

    /// Advance construction by one tick and return the resulting status
    ///
    /// Operational facilities are left untouched.
    pub fn step(&mut self) -> FacilityStatus {
        if self.status == FacilityStatus::Operational {
            return self.status;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.status = FacilityStatus::Operational;
        }
        self.status
    }

    pub fn facility_type(&self) -> &FacilityType {
        &self.facility_type
    }

    pub fn name(&self) -> &str {
        self.facility_type.name()
    }

    pub fn category(&self) -> FacilityCategory {
        self.facility_type.category()
    }

    pub fn scores(&self) -> Scores {
        self.facility_type.scores()
    }

    pub fn settlement_name(&self) -> &str {
        &self.settlement_name
    }

    pub fn status(&self) -> FacilityStatus {
        self.status
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_operational(&self) -> bool {
        self.status == FacilityStatus::Operational
    }
}

impl std::fmt::Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FacilityName: {}\nFacilityStatus: {}",
            self.name(),
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(cost: u32) -> FacilityType {
        FacilityType::new("school", FacilityCategory::Quality, cost, Scores::new(3, 1, 0))
            .unwrap()
    }

    #[test]
    fn test_zero_cost_rejected() {
        let result = FacilityType::new("free", FacilityCategory::Economy, 0, Scores::default());
        assert!(matches!(result, Err(SimError::InvalidFacility(_))));
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(FacilityCategory::from_code(2).unwrap(), FacilityCategory::Environment);
        assert_eq!(FacilityCategory::Economy.code(), 1);
        assert!(FacilityCategory::from_code(9).is_err());
    }

    #[test]
    fn test_new_facility_starts_under_construction() {
        let facility = Facility::new(school(3), "Haifa");
        assert_eq!(facility.status(), FacilityStatus::UnderConstruction);
        assert_eq!(facility.time_left(), 3);
        assert_eq!(facility.settlement_name(), "Haifa");
    }

    #[test]
    fn test_step_counts_down_to_operational() {
        let mut facility = Facility::new(school(3), "Haifa");

        assert_eq!(facility.step(), FacilityStatus::UnderConstruction);
        assert_eq!(facility.time_left(), 2);
        assert_eq!(facility.step(), FacilityStatus::UnderConstruction);
        assert_eq!(facility.time_left(), 1);
        assert_eq!(facility.step(), FacilityStatus::Operational);
        assert_eq!(facility.time_left(), 0);
    }

    #[test]
    fn test_step_after_operational_is_noop() {
        let mut facility = Facility::new(school(1), "Haifa");
        assert_eq!(facility.step(), FacilityStatus::Operational);

        assert_eq!(facility.step(), FacilityStatus::Operational);
        assert_eq!(facility.time_left(), 0);
    }

    #[test]
    fn test_display() {
        let facility = Facility::new(school(2), "Haifa");
        assert_eq!(
            facility.to_string(),
            "FacilityName: school\nFacilityStatus: UNDER_CONSTRUCTION"
        );
    }
}
