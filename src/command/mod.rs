//! Command pipeline
//!
//! Text line -> `parse_command` -> `Command` -> `CommandExecutor` -> output + action log

pub mod action;
pub mod executor;
pub mod parser;

pub use action::{ActionRecord, ActionStatus, Command};
pub use executor::CommandExecutor;
pub use parser::parse_command;
