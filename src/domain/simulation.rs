//! Month-by-month mortgage simulation.
//!
//! [`run`] folds [`Loan::advance`] over months under a fixed budget, optionally
//! parking reserve cash in an offset account, until the loan is paid off, the
//! offset covers it, or the horizon runs out.

use chrono::{Months, NaiveDate};

use super::error::MortgageError;
use super::loan::Loan;

pub const DEFAULT_HORIZON_MONTHS: u32 = 360;
/// Term the simulated loan is amortized over for its minimum payment.
pub const AMORTIZATION_TERM_MONTHS: u32 = 360;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub rate: f64,
    pub principal: f64,
    pub income: f64,
    pub starting_cash: f64,
    pub monthly_expenses: f64,
    pub monthly_reserve: f64,
    pub use_offset: bool,
    pub horizon_months: u32,
    pub amortization_term_months: u32,
}

impl SimulationParams {
    /// Amount paid into the loan each month. May be negative.
    pub fn monthly_payment(&self) -> f64 {
        self.income - self.monthly_expenses - self.monthly_reserve
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationRecord {
    pub month: u32,
    pub principal: f64,
    pub interest_paid_cumulative: f64,
    pub offset_balance: f64,
}

impl SimulationRecord {
    fn snapshot(month: u32, loan: &Loan) -> Self {
        SimulationRecord {
            month,
            principal: loan.principal,
            interest_paid_cumulative: loan.interest_paid_cumulative,
            offset_balance: loan.offset_balance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    PaidOff,
    CoveredByOffset,
    HorizonReached,
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::PaidOff => write!(f, "paid off"),
            Termination::CoveredByOffset => write!(f, "covered by offset"),
            Termination::HorizonReached => write!(f, "horizon reached"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub records: Vec<SimulationRecord>,
    pub termination: Termination,
    /// Minimum payment of the simulated loan at its amortization term.
    pub minimum_payment: f64,
    pub monthly_payment: f64,
}

impl SimulationResult {
    pub fn months_elapsed(&self) -> usize {
        self.records.len()
    }

    pub fn years_elapsed(&self) -> f64 {
        self.records.len() as f64 / 12.0
    }

    pub fn total_interest(&self) -> f64 {
        self.records
            .last()
            .map(|r| r.interest_paid_cumulative)
            .unwrap_or(0.0)
    }

    pub fn final_record(&self) -> Option<&SimulationRecord> {
        self.records.last()
    }

    /// Calendar month in which the run ended for a loan starting on `start`.
    pub fn finish_date(&self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_months(Months::new(self.records.len() as u32))
    }
}

pub fn run(params: &SimulationParams) -> Result<SimulationResult, MortgageError> {
    if params.horizon_months == 0 {
        return Err(MortgageError::invalid(
            "horizon_months",
            "horizon must be at least one month",
        ));
    }

    let mut loan = Loan::new(params.principal, params.rate, params.amortization_term_months)?;
    if params.use_offset {
        loan = loan.with_offset(params.starting_cash);
    }
    let minimum_payment = loan.monthly_payment;

    let payment = params.monthly_payment();
    if payment < minimum_payment {
        tracing::warn!(
            payment,
            minimum = minimum_payment,
            "monthly payment is below the loan's minimum payment"
        );
    }

    let mut records = Vec::with_capacity(params.horizon_months as usize);
    let mut termination = Termination::HorizonReached;

    for month in 0..params.horizon_months {
        if params.use_offset {
            loan = loan.deposit_offset(params.monthly_reserve);
        }
        let (next, _interest) = loan.advance(payment);
        loan = next;
        records.push(SimulationRecord::snapshot(month, &loan));

        if loan.is_paid_off() {
            termination = Termination::PaidOff;
            break;
        }
        if loan.is_covered_by_offset() {
            termination = Termination::CoveredByOffset;
            break;
        }
    }

    tracing::debug!(
        months = records.len(),
        %termination,
        interest = loan.interest_paid_cumulative,
        "simulation finished"
    );

    Ok(SimulationResult {
        records,
        termination,
        minimum_payment,
        monthly_payment: payment,
    })
}
