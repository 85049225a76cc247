#![allow(dead_code)]

use mortgage::domain::error::MortgageError;
use mortgage::domain::simulation::{
    SimulationParams, AMORTIZATION_TERM_MONTHS, DEFAULT_HORIZON_MONTHS,
};
use mortgage::domain::stamp_duty::StampDutyBracket;
use mortgage::ports::duty_table_port::DutyTablePort;
use std::cell::Cell;
use std::io::Write;

pub struct MockDutyTable {
    pub brackets: Vec<StampDutyBracket>,
    pub error: Option<String>,
    pub loads: Cell<usize>,
}

impl MockDutyTable {
    pub fn new() -> Self {
        Self {
            brackets: Vec::new(),
            error: None,
            loads: Cell::new(0),
        }
    }

    pub fn with_bracket(
        mut self,
        jurisdiction: &str,
        max: f64,
        constant: f64,
        percent: f64,
        subtract: f64,
    ) -> Self {
        self.brackets.push(StampDutyBracket {
            jurisdiction: jurisdiction.to_string(),
            upper_bound_price: max,
            base_amount: constant,
            marginal_percent: percent,
            subtract_threshold: subtract,
        });
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DutyTablePort for MockDutyTable {
    fn load_brackets(&self) -> Result<Vec<StampDutyBracket>, MortgageError> {
        self.loads.set(self.loads.get() + 1);
        if let Some(reason) = &self.error {
            return Err(MortgageError::DutyTable {
                reason: reason.clone(),
            });
        }
        Ok(self.brackets.clone())
    }
}

pub fn vic_table() -> MockDutyTable {
    MockDutyTable::new()
        .with_bracket("Vic", 25_000.0, 0.0, 1.4, 0.0)
        .with_bracket("Vic", 130_000.0, 350.0, 2.4, 25_000.0)
        .with_bracket("Vic", 960_000.0, 2_870.0, 6.0, 130_000.0)
        .with_bracket("Vic", 2_000_000.0, 0.0, 5.5, 0.0)
        .with_bracket("Vic", f64::INFINITY, 110_000.0, 6.5, 2_000_000.0)
}

/// The reference scenario: 800k at 2.6% with 6500 a month going to the loan.
pub fn reference_params() -> SimulationParams {
    SimulationParams {
        rate: 2.6,
        principal: 800_000.0,
        income: 9_000.0,
        starting_cash: 170_000.0,
        monthly_expenses: 2_500.0,
        monthly_reserve: 0.0,
        use_offset: false,
        horizon_months: DEFAULT_HORIZON_MONTHS,
        amortization_term_months: AMORTIZATION_TERM_MONTHS,
    }
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
