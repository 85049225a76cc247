//! Stamp duty brackets and lookup.

use std::collections::HashMap;

use super::error::MortgageError;

/// Victorian purchases below this price get the duty discount.
const VIC_DISCOUNT_CEILING: f64 = 1_000_000.0;
const VIC_DISCOUNT_FACTOR: f64 = 0.75;
pub const DISCOUNT_NOTE: &str = "discount applied";

#[derive(Debug, Clone, PartialEq)]
pub struct StampDutyBracket {
    pub jurisdiction: String,
    /// Exclusive upper bound; may be `f64::INFINITY` for the top bracket.
    pub upper_bound_price: f64,
    pub base_amount: f64,
    pub marginal_percent: f64,
    pub subtract_threshold: f64,
}

impl StampDutyBracket {
    pub fn duty(&self, price: f64) -> f64 {
        self.base_amount + self.marginal_percent * (price - self.subtract_threshold) / 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyQuote {
    pub amount: i64,
    pub note: String,
}

impl DutyQuote {
    pub fn discount_applied(&self) -> bool {
        self.note == DISCOUNT_NOTE
    }
}

/// Brackets grouped by jurisdiction, each group sorted ascending by upper bound.
///
/// Jurisdiction names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StampDutyTable {
    brackets: HashMap<String, Vec<StampDutyBracket>>,
}

impl StampDutyTable {
    pub fn new(brackets: Vec<StampDutyBracket>) -> Self {
        let mut grouped: HashMap<String, Vec<StampDutyBracket>> = HashMap::new();
        for bracket in brackets {
            grouped
                .entry(bracket.jurisdiction.to_lowercase())
                .or_default()
                .push(bracket);
        }
        for group in grouped.values_mut() {
            group.sort_by(|a, b| a.upper_bound_price.total_cmp(&b.upper_bound_price));
        }
        Self { brackets: grouped }
    }

    pub fn jurisdictions(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .brackets
            .values()
            .filter_map(|group| group.first().map(|b| b.jurisdiction.clone()))
            .collect();
        names.sort();
        names
    }

    pub fn brackets_for(&self, jurisdiction: &str) -> Option<&[StampDutyBracket]> {
        self.brackets
            .get(&jurisdiction.to_lowercase())
            .map(|group| group.as_slice())
    }

    pub fn duty_for(&self, jurisdiction: &str, price: f64) -> Result<DutyQuote, MortgageError> {
        if !price.is_finite() || price < 0.0 {
            return Err(MortgageError::invalid(
                "price",
                format!("price must be non-negative, got {price}"),
            ));
        }

        let group = self.brackets_for(jurisdiction).ok_or_else(|| {
            MortgageError::UnsupportedJurisdiction {
                jurisdiction: jurisdiction.to_string(),
                supported: self.jurisdictions(),
            }
        })?;

        let bracket = group
            .iter()
            .find(|b| price < b.upper_bound_price)
            .ok_or_else(|| MortgageError::NoDutyBracket {
                jurisdiction: jurisdiction.to_string(),
                price,
            })?;

        let mut duty = bracket.duty(price);
        let mut note = String::new();
        if jurisdiction.eq_ignore_ascii_case("vic") && price < VIC_DISCOUNT_CEILING {
            duty *= VIC_DISCOUNT_FACTOR;
            note = DISCOUNT_NOTE.to_string();
        }

        Ok(DutyQuote {
            amount: duty.trunc() as i64,
            note,
        })
    }
}
