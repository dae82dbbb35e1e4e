//! Diff engine for flagline targeting configurations.
//!
//! Compares a baseline snapshot against a draft and produces structured,
//! output-neutral deltas. Both synthesizers in `flagline-synth` consume these
//! and differ only in how they emit them.
//!
//! # Key Types
//!
//! - [`IdSetDiff`] / [`ValueDiff`] -- Id and value set arithmetic
//! - [`ClauseDelta`] / [`ClauseSetDiff`] -- Clause field and clause list changes
//! - [`StrategyDelta`] -- Strategy kind or payload changes
//! - [`RuleDiff`] / [`RuleUpdate`] -- Rule add/delete/reorder plus nested changes
//! - [`PrerequisiteDiff`] / [`TargetDelta`] -- Prerequisite and user assignment changes

pub mod clause_diff;
pub mod identity;
pub mod prerequisite_diff;
pub mod rule_diff;
pub mod strategy_diff;
pub mod target_diff;

pub use clause_diff::{diff_clause, diff_clauses, ClauseChange, ClauseDelta, ClauseSetDiff};
pub use identity::{
    diff_id_sequences, diff_ids, diff_values, ids, index_by_id, order_changed, IdSetDiff,
    Identified, ValueDiff,
};
pub use prerequisite_diff::{diff_prerequisites, PrerequisiteDiff};
pub use rule_diff::{detect_reorder, diff_rule, diff_rules, RuleDiff, RuleUpdate};
pub use strategy_diff::{diff_strategy, StrategyDelta};
pub use target_diff::{diff_targets, TargetDelta};
