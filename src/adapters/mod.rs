//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod default_duty_table;
pub mod file_config_adapter;
pub mod schedule_csv_adapter;
