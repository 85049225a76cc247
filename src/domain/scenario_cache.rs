//! Memo table for simulation runs.
//!
//! [`run`](super::simulation::run) is deterministic, so results can be reused
//! for identical parameters for the life of the process.

use std::collections::HashMap;

use super::error::MortgageError;
use super::simulation::{self, SimulationParams, SimulationResult};

/// Bit-exact identity of a [`SimulationParams`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScenarioKey {
    rate: u64,
    principal: u64,
    income: u64,
    starting_cash: u64,
    monthly_expenses: u64,
    monthly_reserve: u64,
    use_offset: bool,
    horizon_months: u32,
    amortization_term_months: u32,
}

impl From<&SimulationParams> for ScenarioKey {
    fn from(params: &SimulationParams) -> Self {
        ScenarioKey {
            rate: params.rate.to_bits(),
            principal: params.principal.to_bits(),
            income: params.income.to_bits(),
            starting_cash: params.starting_cash.to_bits(),
            monthly_expenses: params.monthly_expenses.to_bits(),
            monthly_reserve: params.monthly_reserve.to_bits(),
            use_offset: params.use_offset,
            horizon_months: params.horizon_months,
            amortization_term_months: params.amortization_term_months,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScenarioCache {
    entries: HashMap<ScenarioKey, SimulationResult>,
    hits: usize,
    misses: usize,
}

impl ScenarioCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached result for `params`, running the simulation on a miss.
    /// Failed runs are not cached.
    pub fn get_or_run(
        &mut self,
        params: &SimulationParams,
    ) -> Result<&SimulationResult, MortgageError> {
        let key = ScenarioKey::from(params);
        if self.entries.contains_key(&key) {
            self.hits += 1;
            tracing::debug!(hits = self.hits, "scenario cache hit");
        } else {
            let result = simulation::run(params)?;
            self.misses += 1;
            self.entries.insert(key, result);
        }
        Ok(&self.entries[&key])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
