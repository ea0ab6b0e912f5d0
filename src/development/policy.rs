//! Facility selection policies
//!
//! A policy decides which catalog entry a plan starts building next. The
//! variant set is closed, so policies are a tagged enum carrying their own
//! running state rather than trait objects. Every call may advance that
//! state, so two policies with equal state make identical choices.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::city::facility::{FacilityCategory, FacilityType};
use crate::core::error::SimError;
use crate::core::types::Scores;

/// Identifier of a selection policy, as used by commands and config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    #[serde(rename = "nve")]
    Naive,
    #[serde(rename = "bal")]
    Balanced,
    #[serde(rename = "eco")]
    Economy,
    #[serde(rename = "env")]
    Environment,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Naive,
        PolicyKind::Balanced,
        PolicyKind::Economy,
        PolicyKind::Environment,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PolicyKind::Naive => "nve",
            PolicyKind::Balanced => "bal",
            PolicyKind::Economy => "eco",
            PolicyKind::Environment => "env",
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PolicyKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| SimError::UnknownPolicy(s.to_string()))
    }
}

/// A selection policy together with its running state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Cycles through the catalog in index order
    Naive { next: usize },
    /// Picks whatever keeps the three score totals closest together
    Balanced { totals: Scores },
    /// Next economy facility after the last one chosen
    Economy { last: Option<usize> },
    /// Next environment facility after the last one chosen
    Environment { last: Option<usize> },
}

impl SelectionPolicy {
    /// Build a fresh policy of the given kind
    ///
    /// `seed` only matters for `Balanced`, which starts its running totals
    /// from it (normally the owning plan's current scores).
    pub fn new(kind: PolicyKind, seed: Scores) -> Self {
        match kind {
            PolicyKind::Naive => SelectionPolicy::Naive { next: 0 },
            PolicyKind::Balanced => SelectionPolicy::Balanced { totals: seed },
            PolicyKind::Economy => SelectionPolicy::Economy { last: None },
            PolicyKind::Environment => SelectionPolicy::Environment { last: None },
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            SelectionPolicy::Naive { .. } => PolicyKind::Naive,
            SelectionPolicy::Balanced { .. } => PolicyKind::Balanced,
            SelectionPolicy::Economy { .. } => PolicyKind::Economy,
            SelectionPolicy::Environment { .. } => PolicyKind::Environment,
        }
    }

    /// Choose the next facility type to build
    ///
    /// Returns `None` only for an empty catalog.
    pub fn select_facility<'a>(&mut self, catalog: &'a [FacilityType]) -> Option<&'a FacilityType> {
        if catalog.is_empty() {
            return None;
        }

        let chosen = match self {
            SelectionPolicy::Naive { next } => {
                // Reduced on read so entries appended since the last pick are reached
                let idx = *next % catalog.len();
                *next = idx + 1;
                idx
            }
            SelectionPolicy::Balanced { totals } => {
                let idx = least_imbalanced(catalog, *totals);
                *totals += catalog[idx].scores();
                idx
            }
            SelectionPolicy::Economy { last } => {
                let idx = scan_for_category(catalog, *last, FacilityCategory::Economy);
                *last = Some(idx);
                idx
            }
            SelectionPolicy::Environment { last } => {
                let idx = scan_for_category(catalog, *last, FacilityCategory::Environment);
                *last = Some(idx);
                idx
            }
        };

        Some(&catalog[chosen])
    }
}

/// Index of the candidate minimising `max - min` of the updated totals
///
/// `min_by_key` keeps the first of equal minima, so ties go to the lowest index.
fn least_imbalanced(catalog: &[FacilityType], totals: Scores) -> usize {
    catalog
        .iter()
        .enumerate()
        .min_by_key(|(_, candidate)| (totals + candidate.scores()).imbalance())
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Cyclic scan for the next entry of `category`, starting after `last`
///
/// The scan covers the catalog exactly once. With no matching entry it falls
/// back to the first candidate scanned instead of spinning forever.
fn scan_for_category(
    catalog: &[FacilityType],
    last: Option<usize>,
    category: FacilityCategory,
) -> usize {
    let len = catalog.len();
    let start = last.map_or(0, |idx| (idx + 1) % len);

    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&idx| catalog[idx].category() == category)
        .unwrap_or_else(|| {
            tracing::warn!(
                ?category,
                catalog_size = len,
                "no facility of requested category; falling back to next entry"
            );
            start
        })
}
