//! Stamp duty table source port.

use crate::domain::error::MortgageError;
use crate::domain::stamp_duty::{StampDutyBracket, StampDutyTable};

pub trait DutyTablePort {
    fn load_brackets(&self) -> Result<Vec<StampDutyBracket>, MortgageError>;

    fn load_table(&self) -> Result<StampDutyTable, MortgageError> {
        let brackets = self.load_brackets()?;
        if brackets.is_empty() {
            return Err(MortgageError::DutyTable {
                reason: "table has no brackets".into(),
            });
        }
        Ok(StampDutyTable::new(brackets))
    }
}
