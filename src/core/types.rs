//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Simulation tick counter
pub type Tick = u64;

/// Unique identifier for development plans, assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanId(pub u32);

impl PlanId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three independent score dimensions a facility contributes to
///
/// Totals are `i64` and accumulate with saturating arithmetic, so summing
/// any number of `i32`-range facility scores never overflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scores {
    pub quality: i64,
    pub economy: i64,
    pub environment: i64,
}

impl Scores {
    pub fn new(quality: i64, economy: i64, environment: i64) -> Self {
        Self {
            quality,
            economy,
            environment,
        }
    }

    pub fn max(&self) -> i64 {
        self.quality.max(self.economy).max(self.environment)
    }

    pub fn min(&self) -> i64 {
        self.quality.min(self.economy).min(self.environment)
    }

    /// Spread between the strongest and weakest dimension
    pub fn imbalance(&self) -> i64 {
        self.max().saturating_sub(self.min())
    }
}

impl std::ops::Add for Scores {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            quality: self.quality.saturating_add(rhs.quality),
            economy: self.economy.saturating_add(rhs.economy),
            environment: self.environment.saturating_add(rhs.environment),
        }
    }
}

impl std::ops::AddAssign for Scores {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
