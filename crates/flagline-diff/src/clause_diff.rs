//! Clause-level diff: field deltas for one clause pair, and add/remove/change
//! detection across a rule's clause list.

use flagline_types::{Clause, ClauseId, Operator};

use crate::identity::{diff_ids, diff_values, index_by_id};

/// A single difference between two clauses that share an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClauseDelta {
    /// The attribute was replaced.
    Attribute(String),
    /// The operator was replaced.
    Operator(Operator),
    /// A value present in the baseline is gone from the draft.
    RemovedValue(String),
    /// A value present in the draft is new.
    AddedValue(String),
}

/// Compare two clauses sharing an id.
///
/// Emits attribute, then operator, then one delta per removed value, then one
/// per added value. A kind change always shows up as an operator change,
/// since no operator is legal for two kinds.
pub fn diff_clause(baseline: &Clause, draft: &Clause) -> Vec<ClauseDelta> {
    let mut deltas = Vec::new();

    if baseline.attribute != draft.attribute {
        deltas.push(ClauseDelta::Attribute(draft.attribute.clone()));
    }
    if baseline.operator != draft.operator {
        deltas.push(ClauseDelta::Operator(draft.operator));
    }

    let values = diff_values(&baseline.values, &draft.values);
    deltas.extend(values.removed.into_iter().map(ClauseDelta::RemovedValue));
    deltas.extend(values.added.into_iter().map(ClauseDelta::AddedValue));

    deltas
}

/// Field deltas for one clause kept across both snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClauseChange {
    pub clause_id: ClauseId,
    pub deltas: Vec<ClauseDelta>,
}

/// Differences between the clause lists of two versions of a rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClauseSetDiff {
    /// Clauses dropped from the rule, in baseline order.
    pub removed: Vec<ClauseId>,
    /// Clauses new to the rule, fully materialized, in draft order.
    pub added: Vec<Clause>,
    /// Kept clauses with at least one delta, in draft order.
    pub changed: Vec<ClauseChange>,
}

impl ClauseSetDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

/// Compare two clause lists by clause id.
///
/// Clause order is ignored: a rule whose clauses were only reordered has no
/// clause differences.
pub fn diff_clauses(baseline: &[Clause], draft: &[Clause]) -> ClauseSetDiff {
    let ids = diff_ids(baseline, draft);
    let baseline_index = index_by_id(baseline);
    let draft_index = index_by_id(draft);

    let added = ids
        .added
        .iter()
        .filter_map(|id| draft_index.get(id).map(|&i| draft[i].clone()))
        .collect();

    let changed = ids
        .common
        .iter()
        .filter_map(|id| {
            let old = &baseline[*baseline_index.get(id)?];
            let new = &draft[*draft_index.get(id)?];
            let deltas = diff_clause(old, new);
            (!deltas.is_empty()).then(|| ClauseChange {
                clause_id: id.clone(),
                deltas,
            })
        })
        .collect();

    ClauseSetDiff {
        removed: ids.removed,
        added,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(id: &str, attribute: &str, values: &[&str]) -> Clause {
        Clause::compare(id, attribute, Operator::In, values)
    }

    #[test]
    fn identical_clauses_no_deltas() {
        let clause = compare("c1", "country", &["jp", "us"]);
        assert!(diff_clause(&clause, &clause).is_empty());
    }

    #[test]
    fn value_diff_is_symmetric_and_granular() {
        let old = compare("c1", "plan", &["a", "b", "c"]);
        let new = compare("c1", "plan", &["b", "c", "d"]);
        assert_eq!(
            diff_clause(&old, &new),
            vec![
                ClauseDelta::RemovedValue("a".into()),
                ClauseDelta::AddedValue("d".into()),
            ]
        );
    }

    #[test]
    fn reordered_values_are_not_a_change() {
        let old = compare("c1", "plan", &["a", "b"]);
        let new = compare("c1", "plan", &["b", "a"]);
        assert!(diff_clause(&old, &new).is_empty());
    }

    #[test]
    fn attribute_and_operator_come_first() {
        let old = compare("c1", "plan", &["a"]);
        let mut new = compare("c1", "tier", &["b"]);
        new.operator = Operator::Equals;
        assert_eq!(
            diff_clause(&old, &new),
            vec![
                ClauseDelta::Attribute("tier".into()),
                ClauseDelta::Operator(Operator::Equals),
                ClauseDelta::RemovedValue("a".into()),
                ClauseDelta::AddedValue("b".into()),
            ]
        );
    }

    #[test]
    fn clause_set_add_remove_change() {
        let baseline = vec![
            compare("keep", "country", &["jp"]),
            compare("modify", "plan", &["free"]),
            compare("drop", "os", &["ios"]),
        ];
        let draft = vec![
            Clause::segment("new", &["beta"]),
            compare("modify", "plan", &["pro"]),
            compare("keep", "country", &["jp"]),
        ];

        let diff = diff_clauses(&baseline, &draft);
        assert_eq!(diff.removed, vec![ClauseId::from("drop")]);
        assert_eq!(diff.added, vec![Clause::segment("new", &["beta"])]);
        assert_eq!(diff.changed.len(), 1);
        assert_eq!(diff.changed[0].clause_id, ClauseId::from("modify"));
        assert_eq!(diff.changed[0].deltas.len(), 2);
    }

    #[test]
    fn clause_reorder_is_ignored() {
        let a = compare("a", "country", &["jp"]);
        let b = compare("b", "plan", &["pro"]);
        let diff = diff_clauses(&[a.clone(), b.clone()], &[b, a]);
        assert!(diff.is_empty());
    }
}
