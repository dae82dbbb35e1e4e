//! Per-variation user assignment diff.
//!
//! Both snapshots list one assignment per variation in the same order. The
//! list itself is never diffed; only the user set inside each assignment.

use flagline_types::{TargetAssignment, UserId, VariationId};

use crate::identity::{diff_values, index_by_id};

/// Users moved in or out of one variation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetDelta {
    pub variation: VariationId,
    /// In baseline order.
    pub removed_users: Vec<UserId>,
    /// In draft order.
    pub added_users: Vec<UserId>,
}

/// Compare user assignments variation by variation.
///
/// Assignments are paired by variation id. A variation missing from either
/// side is treated as having no users. Deltas follow draft order, then any
/// baseline-only variations in baseline order. Variations without changes
/// are omitted.
pub fn diff_targets(baseline: &[TargetAssignment], draft: &[TargetAssignment]) -> Vec<TargetDelta> {
    let baseline_index = index_by_id(baseline);
    let draft_index = index_by_id(draft);

    let paired = draft.iter().map(|target| {
        let old_users: &[UserId] = baseline_index
            .get(&target.variation)
            .map(|&i| baseline[i].users.as_slice())
            .unwrap_or_default();
        (&target.variation, old_users, target.users.as_slice())
    });
    let dropped = baseline
        .iter()
        .filter(|target| !draft_index.contains_key(&target.variation))
        .map(|target| (&target.variation, target.users.as_slice(), &[] as &[UserId]));

    paired
        .chain(dropped)
        .filter_map(|(variation, old_users, new_users)| {
            let users = diff_values(old_users, new_users);
            (!users.is_empty()).then(|| TargetDelta {
                variation: variation.clone(),
                removed_users: users.removed,
                added_users: users.added,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(ids: &[&str]) -> Vec<UserId> {
        ids.iter().map(|id| UserId::from(*id)).collect()
    }

    #[test]
    fn unchanged_targets_no_deltas() {
        let targets = vec![
            TargetAssignment::new("v1", &["alice"]),
            TargetAssignment::new("v2", &[]),
        ];
        assert!(diff_targets(&targets, &targets).is_empty());
    }

    #[test]
    fn user_moved_between_variations() {
        let baseline = vec![
            TargetAssignment::new("v1", &["alice", "bob"]),
            TargetAssignment::new("v2", &["carol"]),
        ];
        let draft = vec![
            TargetAssignment::new("v1", &["alice"]),
            TargetAssignment::new("v2", &["carol", "bob"]),
        ];

        let deltas = diff_targets(&baseline, &draft);
        assert_eq!(
            deltas,
            vec![
                TargetDelta {
                    variation: "v1".into(),
                    removed_users: users(&["bob"]),
                    added_users: vec![],
                },
                TargetDelta {
                    variation: "v2".into(),
                    removed_users: vec![],
                    added_users: users(&["bob"]),
                },
            ]
        );
    }

    #[test]
    fn missing_baseline_variation_counts_as_empty() {
        let draft = vec![TargetAssignment::new("v1", &["dave"])];
        let deltas = diff_targets(&[], &draft);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].added_users, users(&["dave"]));
    }

    #[test]
    fn missing_draft_variation_removes_its_users() {
        let baseline = vec![TargetAssignment::new("v1", &["alice", "bob"])];
        let deltas = diff_targets(&baseline, &[]);
        assert_eq!(
            deltas,
            vec![TargetDelta {
                variation: "v1".into(),
                removed_users: users(&["alice", "bob"]),
                added_users: vec![],
            }]
        );
    }

    #[test]
    fn baseline_only_variations_follow_draft_order() {
        let baseline = vec![
            TargetAssignment::new("v1", &["alice"]),
            TargetAssignment::new("v2", &["bob"]),
        ];
        let draft = vec![TargetAssignment::new("v2", &["bob", "carol"])];

        let variations: Vec<VariationId> = diff_targets(&baseline, &draft)
            .into_iter()
            .map(|delta| delta.variation)
            .collect();
        assert_eq!(variations, vec![VariationId::from("v2"), VariationId::from("v1")]);
    }
}
