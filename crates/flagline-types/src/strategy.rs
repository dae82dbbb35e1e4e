use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::VariationId;

/// Sum of rollout weights representing 100%. Weights are percentage × 1000.
pub const TOTAL_WEIGHT: u32 = 100_000;

/// Serve a single variation to every matching user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedStrategy {
    pub variation: VariationId,
}

/// One bucket of a percentage rollout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutWeight {
    pub variation: VariationId,
    /// Percentage × 1000 (`50_000` is 50%).
    pub weight: u32,
}

impl RolloutWeight {
    pub fn new(variation: impl Into<VariationId>, weight: u32) -> Self {
        Self {
            variation: variation.into(),
            weight,
        }
    }
}

/// Split matching users across variations by weight.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloutStrategy {
    #[serde(default)]
    pub variations: Vec<RolloutWeight>,
}

impl RolloutStrategy {
    /// Sum of all bucket weights. Not required to equal [`TOTAL_WEIGHT`].
    pub fn total_weight(&self) -> u64 {
        self.variations.iter().map(|w| u64::from(w.weight)).sum()
    }
}

/// Policy deciding which variation a matching user receives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Fixed(FixedStrategy),
    Rollout(RolloutStrategy),
}

/// Discriminant of a [`Strategy`], without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    Fixed,
    Rollout,
}

impl Strategy {
    /// A fixed strategy serving `variation`.
    pub fn fixed(variation: impl Into<VariationId>) -> Self {
        Self::Fixed(FixedStrategy {
            variation: variation.into(),
        })
    }

    /// A rollout strategy from `(variation, weight)` pairs, in order.
    pub fn rollout<V: Into<VariationId>>(weights: impl IntoIterator<Item = (V, u32)>) -> Self {
        Self::Rollout(RolloutStrategy {
            variations: weights
                .into_iter()
                .map(|(variation, weight)| RolloutWeight::new(variation, weight))
                .collect(),
        })
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::Fixed(_) => StrategyKind::Fixed,
            Self::Rollout(_) => StrategyKind::Rollout,
        }
    }

    /// Total rollout weight, or `None` for a fixed strategy.
    pub fn total_weight(&self) -> Option<u64> {
        match self {
            Self::Fixed(_) => None,
            Self::Rollout(rollout) => Some(rollout.total_weight()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "Fixed"),
            Self::Rollout => write!(f, "Rollout"),
        }
    }
}
