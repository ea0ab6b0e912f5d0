//! Scenario loading
//!
//! Two formats build the initial simulation:
//! - line format: one `settlement`, `facility` or `plan` command per line,
//!   blank lines and `#` comments skipped
//! - TOML (files ending in `.toml`): an optional `[engine]` table followed by
//!   `[[settlements]]`, `[[facilities]]` and `[[plans]]` arrays

use serde::Deserialize;
use std::path::Path;

use crate::city::facility::{FacilityCategory, FacilityType};
use crate::city::settlement::{Settlement, SettlementType};
use crate::command::action::Command;
use crate::command::parser::parse_command;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::Scores;
use crate::development::policy::PolicyKind;
use crate::simulation::Simulation;

/// Load a scenario file, picking the format from its extension
///
/// `config` applies to line-format files; TOML files carry their own.
pub fn load_scenario(path: &Path, config: SimulationConfig) -> Result<Simulation> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    tracing::info!(path = %path.display(), toml = is_toml, "loading scenario");
    if is_toml {
        parse_scenario_toml(&content)
    } else {
        parse_scenario_lines(&content, config)
    }
}

/// Build a simulation from line-format scenario text
pub fn parse_scenario_lines(content: &str, config: SimulationConfig) -> Result<Simulation> {
    let mut sim = Simulation::new(config)?;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let at_line = |e: SimError| SimError::Config {
            line: idx + 1,
            message: e.to_string(),
        };

        let command = parse_command(line).map_err(at_line)?;
        if !command.is_scenario_entry() {
            return Err(SimError::Config {
                line: idx + 1,
                message: format!("'{}' is not allowed in a scenario file", command),
            });
        }
        apply_entry(&mut sim, command).map_err(at_line)?;
    }

    Ok(sim)
}

fn apply_entry(sim: &mut Simulation, command: Command) -> Result<()> {
    match command {
        Command::AddSettlement { name, kind } => sim.add_settlement(Settlement::new(name, kind)),
        Command::AddFacility {
            name,
            category,
            cost,
            scores,
        } => sim.add_facility_type(FacilityType::new(name, category, cost, scores)?),
        Command::AddPlan { settlement, policy } => {
            let kind: PolicyKind = policy.parse()?;
            sim.add_plan(&settlement, kind).map(|_| ())
        }
        other => Err(SimError::Parse(format!("unexpected scenario entry: {}", other))),
    }
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    engine: SimulationConfig,
    #[serde(default)]
    settlements: Vec<SettlementEntry>,
    #[serde(default)]
    facilities: Vec<FacilityEntry>,
    #[serde(default)]
    plans: Vec<PlanEntry>,
}

#[derive(Debug, Deserialize)]
struct SettlementEntry {
    name: String,
    kind: SettlementType,
}

#[derive(Debug, Deserialize)]
struct FacilityEntry {
    name: String,
    category: FacilityCategory,
    cost: u32,
    #[serde(default)]
    quality: i32,
    #[serde(default)]
    economy: i32,
    #[serde(default)]
    environment: i32,
}

#[derive(Debug, Deserialize)]
struct PlanEntry {
    settlement: String,
    policy: PolicyKind,
}

/// Build a simulation from TOML scenario text
pub fn parse_scenario_toml(content: &str) -> Result<Simulation> {
    let file: ScenarioFile = toml::from_str(content)?;
    let mut sim = Simulation::new(file.engine)?;

    for entry in file.settlements {
        sim.add_settlement(Settlement::new(entry.name, entry.kind))?;
    }
    for entry in file.facilities {
        let scores = Scores::new(
            entry.quality.into(),
            entry.economy.into(),
            entry.environment.into(),
        );
        sim.add_facility_type(FacilityType::new(entry.name, entry.category, entry.cost, scores)?)?;
    }
    for entry in file.plans {
        sim.add_plan(&entry.settlement, entry.policy)?;
    }

    Ok(sim)
}
