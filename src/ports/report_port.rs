//! Simulation output port.

use std::path::Path;

use crate::domain::error::MortgageError;
use crate::domain::simulation::SimulationResult;

/// Port for exporting the month-by-month record sequence of a run.
pub trait ReportPort {
    fn write(&self, result: &SimulationResult, output_path: &Path) -> Result<(), MortgageError>;
}
