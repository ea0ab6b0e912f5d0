//! Line grammar for commands and line-format scenario entries
//!
//! Tokens are separated by whitespace; names are any run of non-whitespace.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_till1};
use nom::character::complete::{i32 as int, space0, space1, u32 as uint, u8 as code};
use nom::combinator::{all_consuming, map, map_res, value};
use nom::error::Error;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

use crate::city::facility::FacilityCategory;
use crate::city::settlement::SettlementType;
use crate::command::action::Command;
use crate::core::error::{Result, SimError};
use crate::core::types::{PlanId, Scores};

/// Parse one command line
pub fn parse_command(line: &str) -> Result<Command> {
    let mut parser = all_consuming(delimited(
        space0,
        alt((
            step,
            plan_status,
            add_plan,
            add_settlement,
            add_facility,
            change_policy,
            value(Command::Log, tag("log")),
            value(Command::Close, tag("close")),
            value(Command::Backup, tag("backup")),
            value(Command::Restore, tag("restore")),
        )),
        space0,
    ));

    parser
        .parse(line)
        .map(|(_, command)| command)
        .map_err(|e| SimError::Parse(format!("'{}': {}", line.trim(), e)))
}

fn name(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace).parse(input)
}

fn arg<'a, O, P>(parser: P) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    preceded(space1, parser)
}

fn plan_id(input: &str) -> IResult<&str, PlanId> {
    map(uint, PlanId).parse(input)
}

fn step(input: &str) -> IResult<&str, Command> {
    map(preceded(tag("step"), arg(uint)), |steps| Command::Step { steps }).parse(input)
}

fn add_plan(input: &str) -> IResult<&str, Command> {
    map(
        preceded(tag("plan"), (arg(name), arg(name))),
        |(settlement, policy): (&str, &str)| Command::AddPlan {
            settlement: settlement.to_string(),
            policy: policy.to_string(),
        },
    )
    .parse(input)
}

fn add_settlement(input: &str) -> IResult<&str, Command> {
    map(
        preceded(
            tag("settlement"),
            (arg(name), arg(map_res(code, SettlementType::from_code))),
        ),
        |(name, kind): (&str, SettlementType)| Command::AddSettlement {
            name: name.to_string(),
            kind,
        },
    )
    .parse(input)
}

fn add_facility(input: &str) -> IResult<&str, Command> {
    map(
        preceded(
            tag("facility"),
            (
                arg(name),
                arg(map_res(code, FacilityCategory::from_code)),
                arg(uint),
                arg(int),
                arg(int),
                arg(int),
            ),
        ),
        |(name, category, cost, quality, economy, environment): (
            &str,
            FacilityCategory,
            u32,
            i32,
            i32,
            i32,
        )| Command::AddFacility {
            name: name.to_string(),
            category,
            cost,
            scores: Scores::new(quality.into(), economy.into(), environment.into()),
        },
    )
    .parse(input)
}

fn plan_status(input: &str) -> IResult<&str, Command> {
    map(preceded(tag("planStatus"), arg(plan_id)), |plan| {
        Command::PlanStatus { plan }
    })
    .parse(input)
}

fn change_policy(input: &str) -> IResult<&str, Command> {
    map(
        preceded(tag("changePolicy"), (arg(plan_id), arg(name))),
        |(plan, policy): (PlanId, &str)| Command::ChangePolicy {
            plan,
            policy: policy.to_string(),
        },
    )
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step() {
        assert_eq!(parse_command("step 5").unwrap(), Command::Step { steps: 5 });
        assert_eq!(parse_command("  step\t2  ").unwrap(), Command::Step { steps: 2 });
    }

    #[test]
    fn test_parse_plan_vs_plan_status() {
        assert_eq!(
            parse_command("plan KfarSPL eco").unwrap(),
            Command::AddPlan {
                settlement: "KfarSPL".into(),
                policy: "eco".into()
            }
        );
        assert_eq!(
            parse_command("planStatus 3").unwrap(),
            Command::PlanStatus { plan: PlanId(3) }
        );
    }

    #[test]
    fn test_parse_settlement() {
        assert_eq!(
            parse_command("settlement Haifa 2").unwrap(),
            Command::AddSettlement {
                name: "Haifa".into(),
                kind: SettlementType::Metropolis
            }
        );
        assert!(parse_command("settlement Haifa 7").is_err());
    }

    #[test]
    fn test_parse_facility_with_negative_scores() {
        assert_eq!(
            parse_command("facility Factory 1 5 -1 4 -3").unwrap(),
            Command::AddFacility {
                name: "Factory".into(),
                category: FacilityCategory::Economy,
                cost: 5,
                scores: Scores::new(-1, 4, -3),
            }
        );
    }

    #[test]
    fn test_parse_change_policy() {
        assert_eq!(
            parse_command("changePolicy 0 bal").unwrap(),
            Command::ChangePolicy {
                plan: PlanId(0),
                policy: "bal".into()
            }
        );
    }

    #[test]
    fn test_parse_bare_commands() {
        assert_eq!(parse_command("log").unwrap(), Command::Log);
        assert_eq!(parse_command("close").unwrap(), Command::Close);
        assert_eq!(parse_command("backup").unwrap(), Command::Backup);
        assert_eq!(parse_command("restore").unwrap(), Command::Restore);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_command("dance"), Err(SimError::Parse(_))));
        assert!(parse_command("step").is_err());
        assert!(parse_command("step -1").is_err());
        assert!(parse_command("logs").is_err());
        assert!(parse_command("facility A 0 3 1 1").is_err());
        assert!(parse_command("").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        for line in [
            "step 4",
            "plan Kfar nve",
            "settlement Kfar 0",
            "facility Park 2 3 1 0 4",
            "planStatus 1",
            "changePolicy 1 env",
        ] {
            assert_eq!(parse_command(line).unwrap().to_string(), line);
        }
    }
}
