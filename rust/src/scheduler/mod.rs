//! Greedy on-call assignment engine.
//!
//! A single deterministic forward pass over the date range. Each date goes to
//! one eligible surgeon chosen by a pluggable [`SelectionStrategy`], or becomes
//! a gap when nobody qualifies.

mod core;
mod eligibility;
mod selection;
mod state;

pub use self::core::{generate, CallScheduler};
pub use eligibility::{
    check_eligibility, DayContext, Ineligibility, WeekendRule, WEEKEND_RULE_AT_MOST,
    WEEKEND_RULE_STRICT,
};
pub use selection::{
    strategy_by_name, FirstEligible, LeastLoaded, SelectionStrategy, STRATEGY_FIRST_ELIGIBLE,
    STRATEGY_LEAST_LOADED,
};
pub use state::PassState;
