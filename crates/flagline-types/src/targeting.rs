use serde::{Deserialize, Serialize};

use crate::identity::{FeatureId, UserId, VariationId};
use crate::rule::Rule;
use crate::strategy::Strategy;

/// Another flag that must be serving `variation` before this flag's rules
/// are evaluated. A feature appears as a prerequisite at most once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub feature_id: FeatureId,
    pub variation: VariationId,
}

impl Prerequisite {
    pub fn new(feature_id: impl Into<FeatureId>, variation: impl Into<VariationId>) -> Self {
        Self {
            feature_id: feature_id.into(),
            variation: variation.into(),
        }
    }
}

/// Users pinned to a single variation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAssignment {
    pub variation: VariationId,
    #[serde(default)]
    pub users: Vec<UserId>,
}

impl TargetAssignment {
    pub fn new(variation: impl Into<VariationId>, users: &[&str]) -> Self {
        Self {
            variation: variation.into(),
            users: users.iter().map(|u| UserId::from(*u)).collect(),
        }
    }
}

/// The complete targeting state of one feature flag.
///
/// Collections missing from serialized input deserialize as empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetingConfiguration {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
    /// One entry per variation, in the feature's variation order.
    #[serde(default)]
    pub targets: Vec<TargetAssignment>,
    /// Evaluation order: the first matching rule wins.
    #[serde(default)]
    pub rules: Vec<Rule>,
    pub default_strategy: Strategy,
    pub off_variation: VariationId,
}

impl TargetingConfiguration {
    /// A disabled configuration with no prerequisites, targets, or rules.
    pub fn new(default_strategy: Strategy, off_variation: impl Into<VariationId>) -> Self {
        Self {
            enabled: false,
            prerequisites: Vec::new(),
            targets: Vec::new(),
            rules: Vec::new(),
            default_strategy,
            off_variation: off_variation.into(),
        }
    }
}
