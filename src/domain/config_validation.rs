//! Configuration validation.
//!
//! Checks every setting a simulation reads before any work is done, so a bad
//! file fails with the section and key at fault.

use crate::domain::error::MortgageError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), MortgageError> {
    validate_purchase_config(config)?;
    validate_loan_config(config)?;
    validate_budget_config(config)?;
    validate_simulation_config(config)?;
    Ok(())
}

pub fn validate_purchase_config(config: &dyn ConfigPort) -> Result<(), MortgageError> {
    let house_cost = require_double(config, "purchase", "house_cost")?;
    if house_cost <= 0.0 {
        return Err(invalid("purchase", "house_cost", "house_cost must be positive"));
    }
    let cash = require_double(config, "purchase", "cash")?;
    if cash < 0.0 {
        return Err(invalid("purchase", "cash", "cash must be non-negative"));
    }
    if config.has_key("purchase", "borrow") {
        match config.get_optional_double("purchase", "borrow") {
            Some(borrow) if borrow >= 0.0 => {}
            _ => {
                return Err(invalid(
                    "purchase",
                    "borrow",
                    "borrow must be a non-negative number",
                ))
            }
        }
    }
    if let Some(state) = config.get_string("purchase", "state") {
        if state.trim().is_empty() {
            return Err(invalid("purchase", "state", "state must not be blank"));
        }
    }
    Ok(())
}

pub fn validate_loan_config(config: &dyn ConfigPort) -> Result<(), MortgageError> {
    let rate = require_double(config, "loan", "rate")?;
    if rate <= 0.0 || rate >= 100.0 {
        return Err(invalid("loan", "rate", "rate must be between 0 and 100 percent"));
    }
    let term_years = optional_int(config, "loan", "term_years", 30)?;
    if !(1..=50).contains(&term_years) {
        return Err(invalid("loan", "term_years", "term_years must be between 1 and 50"));
    }
    if let Some(start) = config.get_string("loan", "start_date") {
        parse_date(&start, "loan", "start_date")?;
    }
    Ok(())
}

pub fn validate_budget_config(config: &dyn ConfigPort) -> Result<(), MortgageError> {
    let income = require_double(config, "budget", "income")?;
    if income < 0.0 {
        return Err(invalid("budget", "income", "income must be non-negative"));
    }
    for key in ["expenses", "reserve"] {
        if config.has_key("budget", key) {
            match config.get_optional_double("budget", key) {
                Some(value) if value >= 0.0 => {}
                _ => {
                    return Err(invalid(
                        "budget",
                        key,
                        &format!("{key} must be a non-negative number"),
                    ))
                }
            }
        }
    }
    if config.has_key("budget", "offset") && config.get_optional_bool("budget", "offset").is_none()
    {
        return Err(invalid(
            "budget",
            "offset",
            "offset must be true/false, yes/no, on/off or 1/0",
        ));
    }
    Ok(())
}

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), MortgageError> {
    for key in ["horizon_months", "amortization_months"] {
        let value = optional_int(config, "simulation", key, 360)?;
        if !(1..=1200).contains(&value) {
            return Err(invalid(
                "simulation",
                key,
                &format!("{key} must be between 1 and 1200"),
            ));
        }
    }
    Ok(())
}

pub fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, MortgageError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| MortgageError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("invalid {} format, expected YYYY-MM-DD", key),
    })
}

fn require_double(config: &dyn ConfigPort, section: &str, key: &str) -> Result<f64, MortgageError> {
    if !config.has_key(section, key) {
        return Err(MortgageError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        });
    }
    config
        .get_optional_double(section, key)
        .ok_or_else(|| invalid(section, key, &format!("{key} must be a number")))
}

/// Integer value of `key`, `default` when absent, an error when present but
/// not an integer.
fn optional_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: i64,
) -> Result<i64, MortgageError> {
    if !config.has_key(section, key) {
        return Ok(default);
    }
    config
        .get_optional_int(section, key)
        .ok_or_else(|| invalid(section, key, &format!("{key} must be a whole number")))
}

fn invalid(section: &str, key: &str, reason: &str) -> MortgageError {
    MortgageError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
