//! CSV export of the simulation record sequence.
//!
//! Columns are `month,principal,interest_paid_cumulative,offset_balance`, one
//! row per simulated month, values unrounded.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::error::MortgageError;
use crate::domain::simulation::{SimulationRecord, SimulationResult};
use crate::ports::report_port::ReportPort;

pub const SCHEDULE_HEADER: [&str; 4] = [
    "month",
    "principal",
    "interest_paid_cumulative",
    "offset_balance",
];

pub struct CsvScheduleWriter;

impl CsvScheduleWriter {
    pub fn write_records<W: Write>(
        records: &[SimulationRecord],
        writer: W,
    ) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(SCHEDULE_HEADER)?;
        for record in records {
            wtr.write_record([
                record.month.to_string(),
                record.principal.to_string(),
                record.interest_paid_cumulative.to_string(),
                record.offset_balance.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvScheduleWriter {
    fn write(&self, result: &SimulationResult, output_path: &Path) -> Result<(), MortgageError> {
        let output_error = |reason: String| MortgageError::Output {
            path: output_path.display().to_string(),
            reason,
        };
        let file = File::create(output_path).map_err(|e| output_error(e.to_string()))?;
        Self::write_records(&result.records, file).map_err(|e| output_error(e.to_string()))
    }
}
