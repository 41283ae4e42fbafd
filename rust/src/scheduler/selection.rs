//! Selection strategies: which eligible surgeon takes a date.
//!
//! - `first_eligible`: first eligible surgeon in roster order
//! - `least_loaded`: fewest live calls, roster order breaking ties

use crate::params::ValidationError;

use super::state::PassState;

pub const STRATEGY_FIRST_ELIGIBLE: &str = "first_eligible";
pub const STRATEGY_LEAST_LOADED: &str = "least_loaded";

/// Picks the surgeon for one date from the eligible candidates.
///
/// `eligible` yields roster positions in roster order and is lazy: eligibility
/// is only evaluated for candidates the strategy actually pulls.
pub trait SelectionStrategy {
    fn name(&self) -> &'static str;

    fn select(
        &self,
        eligible: &mut dyn Iterator<Item = usize>,
        state: &PassState,
    ) -> Option<usize>;
}

/// Greedy roster-order selection: the first eligible surgeon wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEligible;

impl SelectionStrategy for FirstEligible {
    fn name(&self) -> &'static str {
        STRATEGY_FIRST_ELIGIBLE
    }

    fn select(
        &self,
        eligible: &mut dyn Iterator<Item = usize>,
        _state: &PassState,
    ) -> Option<usize> {
        eligible.next()
    }
}

/// Eligible surgeon with the fewest live `calls_assigned`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoaded;

impl SelectionStrategy for LeastLoaded {
    fn name(&self) -> &'static str {
        STRATEGY_LEAST_LOADED
    }

    fn select(
        &self,
        eligible: &mut dyn Iterator<Item = usize>,
        state: &PassState,
    ) -> Option<usize> {
        // min_by_key keeps the first of equal minima
        eligible.min_by_key(|&index| state.calls_assigned(index))
    }
}

/// Resolve a strategy by its configured name.
pub fn strategy_by_name(name: &str) -> Result<Box<dyn SelectionStrategy>, ValidationError> {
    match name {
        STRATEGY_FIRST_ELIGIBLE => Ok(Box::new(FirstEligible)),
        STRATEGY_LEAST_LOADED => Ok(Box::new(LeastLoaded)),
        other => Err(ValidationError::UnknownStrategy(other.to_string())),
    }
}
