//! Strategy diff for a rule's strategy or the configuration's default.

use flagline_types::{FixedStrategy, RolloutStrategy, Strategy};

/// How a strategy changed between two snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrategyDelta {
    /// Whole-strategy replacement carrying the draft strategy.
    Replaced(Strategy),
    /// Still fixed, serving a different variation. Only produced when
    /// fixed-variation folding is disabled.
    FixedChanged(FixedStrategy),
    /// Still a rollout, with a different weight list.
    RolloutChanged(RolloutStrategy),
}

impl StrategyDelta {
    /// The complete draft strategy this delta moves to.
    pub fn into_strategy(self) -> Strategy {
        match self {
            Self::Replaced(strategy) => strategy,
            Self::FixedChanged(fixed) => Strategy::Fixed(fixed),
            Self::RolloutChanged(rollout) => Strategy::Rollout(rollout),
        }
    }
}

/// Compare two strategies.
///
/// A kind change is always [`StrategyDelta::Replaced`]. Rollout weight lists
/// are compared as ordered `(variation, weight)` lists. With
/// `fold_fixed_variation_change` set, a fixed-to-fixed variation change is
/// also reported as `Replaced`; otherwise it is
/// [`StrategyDelta::FixedChanged`].
pub fn diff_strategy(
    baseline: &Strategy,
    draft: &Strategy,
    fold_fixed_variation_change: bool,
) -> Option<StrategyDelta> {
    match (baseline, draft) {
        (Strategy::Rollout(old), Strategy::Rollout(new)) => {
            (old.variations != new.variations).then(|| StrategyDelta::RolloutChanged(new.clone()))
        }
        (Strategy::Fixed(old), Strategy::Fixed(new)) => {
            if old.variation == new.variation {
                None
            } else if fold_fixed_variation_change {
                Some(StrategyDelta::Replaced(draft.clone()))
            } else {
                Some(StrategyDelta::FixedChanged(new.clone()))
            }
        }
        (Strategy::Fixed(_), Strategy::Rollout(_)) | (Strategy::Rollout(_), Strategy::Fixed(_)) => {
            Some(StrategyDelta::Replaced(draft.clone()))
        }
    }
}
