//! Facility catalog - the ordered set of facility types plans choose from
//!
//! The catalog is append-only: entries keep their index for the lifetime of
//! the simulation, which selection policies rely on for cyclic scans.

use ahash::AHashMap;

use crate::city::facility::FacilityType;
use crate::core::error::{Result, SimError};

/// Catalog of all available facility types
#[derive(Debug, Clone, Default)]
pub struct FacilityCatalog {
    entries: Vec<FacilityType>,
    by_name: AHashMap<String, usize>,
}

impl FacilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a facility type; names are unique
    pub fn add(&mut self, facility_type: FacilityType) -> Result<()> {
        if self.by_name.contains_key(facility_type.name()) {
            return Err(SimError::DuplicateFacility(facility_type.name().to_string()));
        }
        self.by_name
            .insert(facility_type.name().to_string(), self.entries.len());
        self.entries.push(facility_type);
        Ok(())
    }

    /// Get a facility type by name
    pub fn get(&self, name: &str) -> Option<&FacilityType> {
        self.by_name.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All entries in insertion order
    pub fn all(&self) -> &[FacilityType] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
