//! City layer - settlements, facility types, and the facilities built from them

pub mod catalog;
pub mod facility;
pub mod settlement;

pub use catalog::FacilityCatalog;
pub use facility::{Facility, FacilityCategory, FacilityStatus, FacilityType};
pub use settlement::{Settlement, SettlementType};
