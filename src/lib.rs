//! Settlement Sim - development plans that build facilities over discrete ticks

pub mod city;
pub mod command;
pub mod core;
pub mod development;
pub mod simulation;
