//! Engine configuration
//!
//! Tuning knobs that change how the engine runs, never what it computes.

use serde::{Deserialize, Serialize};

/// Configuration for the plan progression engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Minimum plan count before a tick steps plans in parallel
    ///
    /// Plans only read the shared catalog and never touch each other, so
    /// the parallel path produces the same result as the sequential one.
    /// Below this threshold thread overhead exceeds the benefit.
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 256,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.parallel_threshold == 0 {
            return Err("parallel_threshold must be at least 1".into());
        }
        Ok(())
    }

    pub fn use_parallel(&self, plan_count: usize) -> bool {
        plan_count >= self.parallel_threshold
    }
}
