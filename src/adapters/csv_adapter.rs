//! CSV stamp duty table adapter.
//!
//! Expects a header row naming `state,max,constant,percent,subtract` in any
//! order; extra columns are ignored. `max` may be `inf` for an open top bracket.

use crate::adapters::default_duty_table;
use crate::domain::error::MortgageError;
use crate::domain::stamp_duty::StampDutyBracket;
use crate::ports::duty_table_port::DutyTablePort;
use std::fs;
use std::path::PathBuf;

enum TableSource {
    File(PathBuf),
    Inline(String),
}

pub struct CsvDutyTableAdapter {
    source: TableSource,
}

struct Columns {
    state: usize,
    max: usize,
    constant: usize,
    percent: usize,
    subtract: usize,
}

impl CsvDutyTableAdapter {
    pub fn from_path(path: PathBuf) -> Self {
        Self {
            source: TableSource::File(path),
        }
    }

    pub fn from_string(content: &str) -> Self {
        Self {
            source: TableSource::Inline(content.to_string()),
        }
    }

    /// Adapter over the table compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_string(default_duty_table::table())
    }

    fn content(&self) -> Result<String, MortgageError> {
        match &self.source {
            TableSource::File(path) => {
                fs::read_to_string(path).map_err(|e| MortgageError::DutyTable {
                    reason: format!("failed to read {}: {}", path.display(), e),
                })
            }
            TableSource::Inline(content) => Ok(content.clone()),
        }
    }

    fn locate_columns(headers: &csv::StringRecord) -> Result<Columns, MortgageError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| MortgageError::DutyTable {
                    reason: format!("missing {} column", name),
                })
        };
        Ok(Columns {
            state: find("state")?,
            max: find("max")?,
            constant: find("constant")?,
            percent: find("percent")?,
            subtract: find("subtract")?,
        })
    }

    fn parse_number(
        record: &csv::StringRecord,
        index: usize,
        name: &str,
        line: u64,
    ) -> Result<f64, MortgageError> {
        record
            .get(index)
            .ok_or_else(|| MortgageError::DutyTable {
                reason: format!("line {}: missing {} value", line, name),
            })?
            .trim()
            .parse()
            .map_err(|e| MortgageError::DutyTable {
                reason: format!("line {}: invalid {} value: {}", line, name, e),
            })
    }
}

impl DutyTablePort for CsvDutyTableAdapter {
    fn load_brackets(&self) -> Result<Vec<StampDutyBracket>, MortgageError> {
        let content = self.content()?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| MortgageError::DutyTable {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let columns = Self::locate_columns(&headers)?;

        let mut brackets = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| MortgageError::DutyTable {
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let jurisdiction = record
                .get(columns.state)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| MortgageError::DutyTable {
                    reason: format!("line {}: missing state value", line),
                })?;

            brackets.push(StampDutyBracket {
                jurisdiction: jurisdiction.to_string(),
                upper_bound_price: Self::parse_number(&record, columns.max, "max", line)?,
                base_amount: Self::parse_number(&record, columns.constant, "constant", line)?,
                marginal_percent: Self::parse_number(&record, columns.percent, "percent", line)?,
                subtract_threshold: Self::parse_number(&record, columns.subtract, "subtract", line)?,
            });
        }

        tracing::debug!(brackets = brackets.len(), "loaded stamp duty table");
        Ok(brackets)
    }
}
