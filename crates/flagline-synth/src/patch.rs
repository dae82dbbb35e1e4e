//! Scheduled mode: coarse change records for deferred application.
//!
//! Rules are replaced whole. Target changes stay per user, grouped by
//! variation. Scalar fields are whole-value replacements.

use serde::{Deserialize, Serialize};
use tracing::debug;

use flagline_diff::{diff_prerequisites, diff_rules, diff_strategy, diff_targets};
use flagline_types::{Prerequisite, Rule, RuleId, Strategy, TargetingConfiguration, UserId, VariationId};

use crate::options::SynthesisOptions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    Create,
    Update,
    Delete,
}

/// Whole-rule change record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleChange {
    Create { rule: Rule },
    /// Full draft rule, replacing every clause and the strategy.
    Update { rule: Rule },
    Delete { rule_id: RuleId },
}

impl RuleChange {
    pub fn change_type(&self) -> ChangeType {
        match self {
            Self::Create { .. } => ChangeType::Create,
            Self::Update { .. } => ChangeType::Update,
            Self::Delete { .. } => ChangeType::Delete,
        }
    }

    pub fn rule_id(&self) -> &RuleId {
        match self {
            Self::Create { rule } | Self::Update { rule } => &rule.id,
            Self::Delete { rule_id } => rule_id,
        }
    }
}

/// Users added to (`Create`) or removed from (`Delete`) one variation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetChange {
    pub change_type: ChangeType,
    pub variation: VariationId,
    pub users: Vec<UserId>,
}

/// A prerequisite created, re-pointed at another variation, or deleted.
/// `Delete` carries the baseline prerequisite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteChange {
    pub change_type: ChangeType,
    pub prerequisite: Prerequisite,
}

/// Complete rule order to apply after the rule changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOrder {
    pub rule_ids: Vec<RuleId>,
}

/// Everything needed to bring the baseline in line with the draft at a
/// later time. `None` scalar fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    pub enabled: Option<bool>,
    pub prerequisite_changes: Vec<PrerequisiteChange>,
    pub target_changes: Vec<TargetChange>,
    pub rule_changes: Vec<RuleChange>,
    pub rule_order: Option<RuleOrder>,
    pub default_strategy: Option<Strategy>,
    pub off_variation: Option<VariationId>,
}

impl Patch {
    /// Returns `true` if applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.change_count() == 0
    }

    /// Number of change records and replacements in the patch.
    pub fn change_count(&self) -> usize {
        usize::from(self.enabled.is_some())
            + self.prerequisite_changes.len()
            + self.target_changes.len()
            + self.rule_changes.len()
            + usize::from(self.rule_order.is_some())
            + usize::from(self.default_strategy.is_some())
            + usize::from(self.off_variation.is_some())
    }
}

/// Compute the scheduled-mode patch that brings `baseline` in line with
/// `draft`.
///
/// Rule changes are deletes (baseline order), creates, then updates (draft
/// order). Any clause or strategy difference in a kept rule becomes one
/// `Update` carrying the full draft rule. Fields not marked touched in
/// `options` are skipped.
pub fn synthesize_patch(
    baseline: &TargetingConfiguration,
    draft: &TargetingConfiguration,
    options: &SynthesisOptions,
) -> Patch {
    let touched = &options.touched;
    let fold = options.fold_fixed_variation_change;
    let mut patch = Patch::default();

    if touched.enabled && baseline.enabled != draft.enabled {
        patch.enabled = Some(draft.enabled);
    }

    if touched.prerequisites {
        let diff = diff_prerequisites(&baseline.prerequisites, &draft.prerequisites);
        let records = [
            (ChangeType::Delete, diff.removed),
            (ChangeType::Create, diff.added),
            (ChangeType::Update, diff.changed),
        ];
        for (change_type, prerequisites) in records {
            patch.prerequisite_changes.extend(
                prerequisites
                    .into_iter()
                    .map(|prerequisite| PrerequisiteChange {
                        change_type,
                        prerequisite,
                    }),
            );
        }
    }

    if touched.targets {
        for delta in diff_targets(&baseline.targets, &draft.targets) {
            if !delta.removed_users.is_empty() {
                patch.target_changes.push(TargetChange {
                    change_type: ChangeType::Delete,
                    variation: delta.variation.clone(),
                    users: delta.removed_users,
                });
            }
            if !delta.added_users.is_empty() {
                patch.target_changes.push(TargetChange {
                    change_type: ChangeType::Create,
                    variation: delta.variation,
                    users: delta.added_users,
                });
            }
        }
    }

    if touched.rules {
        let diff = diff_rules(&baseline.rules, &draft.rules, fold);
        patch.rule_changes.extend(
            diff.removed
                .into_iter()
                .map(|rule_id| RuleChange::Delete { rule_id }),
        );
        patch
            .rule_changes
            .extend(diff.added.into_iter().map(|rule| RuleChange::Create { rule }));
        patch.rule_changes.extend(
            diff.updated
                .into_iter()
                .map(|update| RuleChange::Update { rule: update.draft }),
        );
        patch.rule_order = diff.reorder.map(|rule_ids| RuleOrder { rule_ids });
    }

    if touched.default_strategy
        && diff_strategy(&baseline.default_strategy, &draft.default_strategy, fold).is_some()
    {
        patch.default_strategy = Some(draft.default_strategy.clone());
    }

    if touched.off_variation && baseline.off_variation != draft.off_variation {
        patch.off_variation = Some(draft.off_variation.clone());
    }

    debug!(
        prerequisites = patch.prerequisite_changes.len(),
        targets = patch.target_changes.len(),
        rules = patch.rule_changes.len(),
        reorder = patch.rule_order.is_some(),
        "synthesized scheduled patch"
    );
    patch
}
