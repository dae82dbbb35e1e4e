//! Rule-level diff: add, delete, reorder, and nested clause/strategy changes.

use std::hash::Hash;

use flagline_types::{Rule, RuleId};
use tracing::debug;

use crate::clause_diff::{diff_clauses, ClauseSetDiff};
use crate::identity::{diff_id_sequences, ids, index_by_id, order_changed, IdSetDiff};
use crate::strategy_diff::{diff_strategy, StrategyDelta};

/// Nested differences of one rule present in both snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleUpdate {
    pub rule_id: RuleId,
    pub clauses: ClauseSetDiff,
    pub strategy: Option<StrategyDelta>,
    /// The rule as it appears in the draft.
    pub draft: Rule,
}

/// The result of comparing two ordered rule lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleDiff {
    /// Deleted rule ids, in baseline order.
    pub removed: Vec<RuleId>,
    /// New rules, fully materialized, in draft order.
    pub added: Vec<Rule>,
    /// Complete draft rule order, present only when a reorder is needed.
    pub reorder: Option<Vec<RuleId>>,
    /// Kept rules with nested differences, in draft order.
    pub updated: Vec<RuleUpdate>,
}

impl RuleDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
            && self.added.is_empty()
            && self.reorder.is_none()
            && self.updated.is_empty()
    }
}

/// Compare two rule lists by rule id.
///
/// See [`detect_reorder`] for when a reorder is reported. Every kept rule is
/// diffed clause by clause and by strategy; a rule with any difference shows
/// up once in [`RuleDiff::updated`].
pub fn diff_rules(
    baseline: &[Rule],
    draft: &[Rule],
    fold_fixed_variation_change: bool,
) -> RuleDiff {
    let baseline_ids = ids(baseline);
    let draft_ids = ids(draft);
    let id_diff = diff_id_sequences(&baseline_ids, &draft_ids);

    let reorder = detect_reorder(&baseline_ids, &draft_ids, &id_diff);
    if let Some(order) = &reorder {
        debug!(rules = order.len(), "rule order changed");
    }

    let baseline_index = index_by_id(baseline);
    let draft_index = index_by_id(draft);

    let added = id_diff
        .added
        .iter()
        .filter_map(|id| draft_index.get(id).map(|&i| draft[i].clone()))
        .collect();

    let updated = id_diff
        .common
        .iter()
        .filter_map(|id| {
            let old = &baseline[*baseline_index.get(id)?];
            let new = &draft[*draft_index.get(id)?];
            diff_rule(old, new, fold_fixed_variation_change)
        })
        .collect();

    RuleDiff {
        removed: id_diff.removed,
        added,
        reorder,
        updated,
    }
}

/// Compare two versions of the same rule. `None` if nothing changed.
pub fn diff_rule(
    baseline: &Rule,
    draft: &Rule,
    fold_fixed_variation_change: bool,
) -> Option<RuleUpdate> {
    let clauses = diff_clauses(&baseline.clauses, &draft.clauses);
    let strategy = diff_strategy(
        &baseline.strategy,
        &draft.strategy,
        fold_fixed_variation_change,
    );

    if clauses.is_empty() && strategy.is_none() {
        return None;
    }

    Some(RuleUpdate {
        rule_id: draft.id.clone(),
        clauses,
        strategy,
        draft: draft.clone(),
    })
}

/// Decide whether the draft order must be sent explicitly.
///
/// Exactly one branch applies:
/// - rules were removed: the surviving baseline ids must lead the draft
///   sequence in the same order;
/// - else rules were added: the full baseline sequence must lead the draft;
/// - else: the sequences must be equal.
///
/// Returns the complete draft sequence when they differ. A draft that only
/// appends new rules needs no reorder.
pub fn detect_reorder<I>(baseline: &[I], draft: &[I], id_diff: &IdSetDiff<I>) -> Option<Vec<I>>
where
    I: Clone + Eq + Hash,
{
    let changed = if !id_diff.removed.is_empty() {
        let survivors: Vec<&I> = baseline
            .iter()
            .filter(|id| !id_diff.removed.contains(*id))
            .collect();
        !leads(&survivors, draft)
    } else if !id_diff.added.is_empty() {
        let prefix: Vec<&I> = baseline.iter().collect();
        !leads(&prefix, draft)
    } else {
        order_changed(baseline, draft)
    };

    changed.then(|| draft.to_vec())
}

fn leads<I: Eq>(prefix: &[&I], sequence: &[I]) -> bool {
    prefix.len() <= sequence.len() && prefix.iter().zip(sequence).all(|(a, b)| *a == b)
}
