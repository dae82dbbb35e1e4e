//! Prerequisite diff, keyed by feature id.

use flagline_types::Prerequisite;

use crate::identity::{diff_ids, index_by_id};

/// Differences between two prerequisite lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrerequisiteDiff {
    /// Baseline prerequisites whose feature is gone from the draft.
    pub removed: Vec<Prerequisite>,
    /// Draft prerequisites on a feature the baseline did not depend on.
    pub added: Vec<Prerequisite>,
    /// Draft prerequisites whose required variation changed.
    pub changed: Vec<Prerequisite>,
}

impl PrerequisiteDiff {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.changed.is_empty()
    }
}

pub fn diff_prerequisites(baseline: &[Prerequisite], draft: &[Prerequisite]) -> PrerequisiteDiff {
    let ids = diff_ids(baseline, draft);
    let baseline_index = index_by_id(baseline);
    let draft_index = index_by_id(draft);

    let pick = |items: &[Prerequisite], index: Option<&usize>| index.map(|&i| items[i].clone());

    PrerequisiteDiff {
        removed: ids
            .removed
            .iter()
            .filter_map(|id| pick(baseline, baseline_index.get(id)))
            .collect(),
        added: ids
            .added
            .iter()
            .filter_map(|id| pick(draft, draft_index.get(id)))
            .collect(),
        changed: ids
            .common
            .iter()
            .filter_map(|id| {
                let old = &baseline[*baseline_index.get(id)?];
                let new = &draft[*draft_index.get(id)?];
                (old.variation != new.variation).then(|| new.clone())
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_prerequisites_no_diff() {
        let list = vec![Prerequisite::new("f1", "on")];
        assert!(diff_prerequisites(&list, &list).is_empty());
    }

    #[test]
    fn add_remove_and_change() {
        let baseline = vec![
            Prerequisite::new("keep", "on"),
            Prerequisite::new("flip", "on"),
            Prerequisite::new("drop", "on"),
        ];
        let draft = vec![
            Prerequisite::new("flip", "off"),
            Prerequisite::new("keep", "on"),
            Prerequisite::new("new", "v3"),
        ];

        let diff = diff_prerequisites(&baseline, &draft);
        assert_eq!(diff.removed, vec![Prerequisite::new("drop", "on")]);
        assert_eq!(diff.added, vec![Prerequisite::new("new", "v3")]);
        assert_eq!(diff.changed, vec![Prerequisite::new("flip", "off")]);
    }
}
