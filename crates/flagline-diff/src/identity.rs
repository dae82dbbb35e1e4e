//! Identity and set-difference helpers shared by every differ.
//!
//! Collections are ordered sequences of id-bearing items. Lookup by id goes
//! through maps built on demand here, so "order matters" and "lookup by id"
//! stay separate concerns. Ids are assumed unique within one snapshot.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use flagline_types::{
    Clause, ClauseId, FeatureId, Prerequisite, Rule, RuleId, TargetAssignment, VariationId,
};

/// An item with a stable identity key.
pub trait Identified {
    type Id: Clone + Eq + Hash;

    fn id(&self) -> &Self::Id;
}

impl Identified for Rule {
    type Id = RuleId;

    fn id(&self) -> &RuleId {
        &self.id
    }
}

impl Identified for Clause {
    type Id = ClauseId;

    fn id(&self) -> &ClauseId {
        &self.id
    }
}

impl Identified for Prerequisite {
    type Id = FeatureId;

    fn id(&self) -> &FeatureId {
        &self.feature_id
    }
}

impl Identified for TargetAssignment {
    type Id = VariationId;

    fn id(&self) -> &VariationId {
        &self.variation
    }
}

/// Result of comparing the id sets of two sequences.
///
/// `added` follows draft order, `removed` follows baseline order, `common`
/// follows draft order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdSetDiff<I> {
    pub added: Vec<I>,
    pub removed: Vec<I>,
    pub common: Vec<I>,
}

impl<I> IdSetDiff<I> {
    /// Returns `true` if both sequences hold the same id set.
    pub fn same_ids(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Ids of `items`, in sequence order.
pub fn ids<T: Identified>(items: &[T]) -> Vec<T::Id> {
    items.iter().map(|item| item.id().clone()).collect()
}

/// Map from id to position in `items`.
pub fn index_by_id<T: Identified>(items: &[T]) -> HashMap<&T::Id, usize> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id(), index))
        .collect()
}

/// Set arithmetic over two id sequences: `draft - baseline`,
/// `baseline - draft`, and `baseline ∩ draft`.
pub fn diff_id_sequences<I>(baseline: &[I], draft: &[I]) -> IdSetDiff<I>
where
    I: Clone + Eq + Hash,
{
    let in_baseline: HashSet<&I> = baseline.iter().collect();
    let in_draft: HashSet<&I> = draft.iter().collect();

    let added = draft
        .iter()
        .filter(|id| !in_baseline.contains(id))
        .cloned()
        .collect();
    let removed = baseline
        .iter()
        .filter(|id| !in_draft.contains(id))
        .cloned()
        .collect();
    let common = draft
        .iter()
        .filter(|id| in_baseline.contains(id))
        .cloned()
        .collect();

    IdSetDiff {
        added,
        removed,
        common,
    }
}

/// [`diff_id_sequences`] over the ids of two item sequences.
pub fn diff_ids<T: Identified>(baseline: &[T], draft: &[T]) -> IdSetDiff<T::Id> {
    diff_id_sequences(&ids(baseline), &ids(draft))
}

/// Returns `true` if the sequences hold the same id set in a different order.
pub fn order_changed<I>(baseline: &[I], draft: &[I]) -> bool
where
    I: Clone + Eq + Hash,
{
    diff_id_sequences(baseline, draft).same_ids() && baseline != draft
}

/// Values removed from and added to a list, with list order treated as
/// insignificant. Each value appears at most once per side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueDiff<T> {
    pub removed: Vec<T>,
    pub added: Vec<T>,
}

impl<T> ValueDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Set difference of two value lists. `removed` follows baseline order and
/// `added` follows draft order.
pub fn diff_values<T>(baseline: &[T], draft: &[T]) -> ValueDiff<T>
where
    T: Clone + Eq + Hash,
{
    ValueDiff {
        removed: difference(baseline, draft),
        added: difference(draft, baseline),
    }
}

fn difference<T>(left: &[T], right: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let exclude: HashSet<&T> = right.iter().collect();
    let mut seen = HashSet::new();
    left.iter()
        .filter(|value| !exclude.contains(value) && seen.insert(*value))
        .cloned()
        .collect()
}
