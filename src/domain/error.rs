//! Domain error types.

/// Top-level error type for the mortgage simulator.
#[derive(Debug, thiserror::Error)]
pub enum MortgageError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "no stamp duty brackets for jurisdiction {jurisdiction} (supported: {})",
        .supported.join(", ")
    )]
    UnsupportedJurisdiction {
        jurisdiction: String,
        supported: Vec<String>,
    },

    #[error("no stamp duty bracket in {jurisdiction} covers a price of {price}")]
    NoDutyBracket { jurisdiction: String, price: f64 },

    #[error("purchase is short of {shortfall:.0} in cash")]
    FundingShortfall { shortfall: f64 },

    #[error("duty table error: {reason}")]
    DutyTable { reason: String },

    #[error("failed to write {path}: {reason}")]
    Output { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MortgageError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&MortgageError> for std::process::ExitCode {
    fn from(err: &MortgageError) -> Self {
        let code: u8 = match err {
            MortgageError::Io(_) | MortgageError::Output { .. } => 1,
            MortgageError::ConfigParse { .. }
            | MortgageError::ConfigMissing { .. }
            | MortgageError::ConfigInvalid { .. } => 2,
            MortgageError::DutyTable { .. } => 3,
            MortgageError::InvalidInput { .. } => 4,
            MortgageError::UnsupportedJurisdiction { .. }
            | MortgageError::NoDutyBracket { .. }
            | MortgageError::FundingShortfall { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
