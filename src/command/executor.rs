//! Command execution - applies parsed commands to the simulation

use crate::city::facility::FacilityType;
use crate::city::settlement::Settlement;
use crate::command::action::{ActionRecord, Command};
use crate::core::error::Result;
use crate::development::policy::PolicyKind;
use crate::simulation::Simulation;

/// Executes commands and keeps the action log
pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute a command, returning any text it produces for display
    ///
    /// The command is recorded as COMPLETED or ERROR unless it is `log` or
    /// `close`. A failed command leaves the simulation unchanged.
    pub fn execute(sim: &mut Simulation, command: Command) -> Result<Option<String>> {
        let result = Self::apply(sim, &command);

        match &result {
            Ok(_) => tracing::debug!(%command, "command completed"),
            Err(e) => tracing::debug!(%command, error = %e, "command failed"),
        }

        if command.is_logged() {
            let record = match &result {
                Ok(_) => ActionRecord::completed(command),
                Err(e) => ActionRecord::failed(command, e.to_string()),
            };
            sim.record_action(record);
        }

        result
    }

    fn apply(sim: &mut Simulation, command: &Command) -> Result<Option<String>> {
        match command {
            Command::Step { steps } => {
                sim.step(*steps);
                Ok(None)
            }
            Command::AddPlan { settlement, policy } => {
                sim.settlement(settlement)?;
                let kind: PolicyKind = policy.parse()?;
                sim.add_plan(settlement, kind)?;
                Ok(None)
            }
            Command::AddSettlement { name, kind } => {
                sim.add_settlement(Settlement::new(name.clone(), *kind))?;
                Ok(None)
            }
            Command::AddFacility {
                name,
                category,
                cost,
                scores,
            } => {
                let facility_type = FacilityType::new(name.clone(), *category, *cost, *scores)?;
                sim.add_facility_type(facility_type)?;
                Ok(None)
            }
            Command::PlanStatus { plan } => Ok(Some(sim.plan(*plan)?.status_report())),
            Command::ChangePolicy { plan, policy } => {
                sim.plan(*plan)?;
                let kind: PolicyKind = policy.parse()?;
                let previous = sim.change_policy(*plan, kind)?;
                Ok(Some(format!(
                    "planID: {}\npreviousPolicy: {}\nnewPolicy: {}",
                    plan, previous, kind
                )))
            }
            Command::Log => {
                let lines: Vec<String> = sim.actions_log().iter().map(|r| r.to_string()).collect();
                Ok(Some(lines.join("\n")))
            }
            Command::Close => {
                let reports: Vec<String> =
                    sim.plans().iter().map(|plan| plan.summary_report()).collect();
                sim.close();
                Ok(Some(reports.join("\n")))
            }
            Command::Backup => {
                sim.backup();
                Ok(None)
            }
            Command::Restore => {
                sim.restore()?;
                Ok(None)
            }
        }
    }
}
