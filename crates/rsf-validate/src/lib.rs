//! Business-rule validation for decoded RSF datasets.
//!
//! The engine runs a closed, ordered set of rules over one [`rsf_model::Dataset`]
//! and aggregates every finding into a single [`rsf_model::ValidationReport`].
//! A rule that fails to execute is reported as a system error instead of
//! aborting the run.

mod engine;
mod rules;

pub use engine::{Rule, RuleEngine, RuleFailure};
