//! Opt-in checks for the contracts the diff engine assumes but never
//! enforces: unique ids, legal clause operators, full rollout weights, and a
//! shared variation order across snapshot pairs.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::{TypeError, TypeResult};
use crate::strategy::{Strategy, TOTAL_WEIGHT};
use crate::targeting::TargetingConfiguration;

impl TargetingConfiguration {
    /// Check a single snapshot. Stops at the first violation.
    pub fn validate(&self) -> TypeResult<()> {
        ensure_unique("rule", self.rules.iter().map(|r| &r.id))?;
        ensure_unique(
            "prerequisite",
            self.prerequisites.iter().map(|p| &p.feature_id),
        )?;
        ensure_unique("target variation", self.targets.iter().map(|t| &t.variation))?;

        for rule in &self.rules {
            ensure_unique("clause", rule.clauses.iter().map(|c| &c.id))?;
            for clause in &rule.clauses {
                if !clause.is_well_formed() {
                    return Err(TypeError::IllegalOperator {
                        clause: clause.id.to_string(),
                        kind: clause.kind.to_string(),
                        operator: clause.operator.to_string(),
                    });
                }
            }
            ensure_full_rollout(&rule.strategy, || format!("rule {}", rule.id))?;
        }

        ensure_full_rollout(&self.default_strategy, || "default strategy".to_string())
    }
}

/// Check that two snapshots list their targets in the same variation order.
pub fn check_compatible(
    baseline: &TargetingConfiguration,
    draft: &TargetingConfiguration,
) -> TypeResult<()> {
    if baseline.targets.len() != draft.targets.len() {
        return Err(TypeError::TargetCountMismatch {
            baseline: baseline.targets.len(),
            draft: draft.targets.len(),
        });
    }
    for (index, (b, d)) in baseline.targets.iter().zip(&draft.targets).enumerate() {
        if b.variation != d.variation {
            return Err(TypeError::TargetOrderMismatch {
                index,
                baseline: b.variation.to_string(),
                draft: d.variation.to_string(),
            });
        }
    }
    Ok(())
}

fn ensure_unique<'a, T>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a T>,
) -> TypeResult<()>
where
    T: Eq + Hash + ToString + 'a,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TypeError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn ensure_full_rollout(
    strategy: &Strategy,
    scope: impl FnOnce() -> String,
) -> TypeResult<()> {
    match strategy.total_weight() {
        Some(actual) if actual != u64::from(TOTAL_WEIGHT) => Err(TypeError::WeightSum {
            scope: scope(),
            expected: TOTAL_WEIGHT,
            actual,
        }),
        _ => Ok(()),
    }
}
