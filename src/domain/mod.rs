//! Core domain types and logic.

pub mod loan;
pub mod stamp_duty;
pub mod simulation;
pub mod scenario_cache;
pub mod purchase;
pub mod config_validation;
pub mod error;
