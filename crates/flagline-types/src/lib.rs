//! Value model for flagline targeting configurations.
//!
//! These are immutable snapshot types with identity fields and no behavior
//! beyond construction, lookup, and opt-in validation. Every other flagline
//! crate depends on `flagline-types`.
//!
//! # Key Types
//!
//! - [`TargetingConfiguration`]: The aggregate being diffed
//! - [`Rule`] / [`Clause`]: Ordered, id-keyed targeting conditions
//! - [`Strategy`]: Fixed variation or weighted rollout
//! - [`Prerequisite`] / [`TargetAssignment`]: Flag dependencies and pinned users
//! - [`RuleId`], [`ClauseId`], [`VariationId`], [`FeatureId`], [`UserId`]: Opaque identifiers

pub mod clause;
pub mod error;
pub mod identity;
pub mod rule;
pub mod strategy;
pub mod targeting;
pub mod validation;

pub use clause::{Clause, ClauseKind, Operator};
pub use error::{TypeError, TypeResult};
pub use identity::{ClauseId, FeatureId, RuleId, UserId, VariationId};
pub use rule::Rule;
pub use strategy::{
    FixedStrategy, RolloutStrategy, RolloutWeight, Strategy, StrategyKind, TOTAL_WEIGHT,
};
pub use targeting::{Prerequisite, TargetAssignment, TargetingConfiguration};
pub use validation::check_compatible;
