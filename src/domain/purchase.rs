//! Purchase funding: stamp duty, borrowing and the cash left over.

use super::error::MortgageError;
use super::stamp_duty::{DutyQuote, StampDutyTable};

#[derive(Debug, Clone, PartialEq)]
pub struct PurchasePlan {
    pub house_cost: f64,
    pub cash: f64,
    pub jurisdiction: String,
    /// Amount to borrow. Defaults to whatever the cash does not cover.
    pub borrow: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseBreakdown {
    pub stamp_duty: DutyQuote,
    pub borrow: f64,
    /// Cash remaining after settlement; seeds the offset account.
    pub cash_left: f64,
    pub lvr: f64,
}

impl PurchasePlan {
    pub fn total_cost(&self, stamp_duty: &DutyQuote) -> f64 {
        self.house_cost + stamp_duty.amount as f64
    }

    pub fn breakdown(&self, table: &StampDutyTable) -> Result<PurchaseBreakdown, MortgageError> {
        if !self.house_cost.is_finite() || self.house_cost <= 0.0 {
            return Err(MortgageError::invalid(
                "house_cost",
                "house cost must be positive",
            ));
        }
        if !self.cash.is_finite() || self.cash < 0.0 {
            return Err(MortgageError::invalid("cash", "cash must be non-negative"));
        }

        let stamp_duty = table.duty_for(&self.jurisdiction, self.house_cost)?;
        let total_cost = self.total_cost(&stamp_duty);

        let borrow = match self.borrow {
            Some(amount) if amount < 0.0 || amount > total_cost => {
                return Err(MortgageError::invalid(
                    "borrow",
                    format!("borrow must be between 0 and {total_cost:.0}"),
                ));
            }
            Some(amount) => amount,
            None => (total_cost - self.cash).max(0.0),
        };

        let cash_left = self.cash - total_cost + borrow;
        if cash_left < 0.0 {
            return Err(MortgageError::FundingShortfall {
                shortfall: -cash_left,
            });
        }

        Ok(PurchaseBreakdown {
            stamp_duty,
            borrow,
            cash_left,
            lvr: borrow / self.house_cost,
        })
    }
}
