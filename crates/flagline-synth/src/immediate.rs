//! Immediate mode: every difference becomes the finest-grained command.

use tracing::debug;

use flagline_diff::{
    diff_prerequisites, diff_rules, diff_strategy, diff_targets, ClauseDelta, RuleDiff,
    RuleUpdate, StrategyDelta,
};
use flagline_types::{RuleId, TargetingConfiguration};

use crate::command::Command;
use crate::options::SynthesisOptions;

/// Compute the ordered command list that brings `baseline` in line with
/// `draft`.
///
/// Output order: enable toggle, target users, rules (deletes, adds, reorder,
/// then per-rule clause and strategy commands in draft order), default
/// strategy, off variation, sampling seed reset, prerequisites. Fields not
/// marked touched in `options` are skipped.
pub fn synthesize(
    baseline: &TargetingConfiguration,
    draft: &TargetingConfiguration,
    options: &SynthesisOptions,
) -> Vec<Command> {
    let touched = &options.touched;
    let fold = options.fold_fixed_variation_change;
    let mut commands = Vec::new();

    if touched.enabled && baseline.enabled != draft.enabled {
        commands.push(if draft.enabled {
            Command::EnableFeature
        } else {
            Command::DisableFeature
        });
    }

    if touched.targets {
        for delta in diff_targets(&baseline.targets, &draft.targets) {
            for user in delta.removed_users {
                commands.push(Command::RemoveUserFromVariation {
                    variation: delta.variation.clone(),
                    user,
                });
            }
            for user in delta.added_users {
                commands.push(Command::AddUserToVariation {
                    variation: delta.variation.clone(),
                    user,
                });
            }
        }
    }

    if touched.rules {
        push_rule_commands(&mut commands, diff_rules(&baseline.rules, &draft.rules, fold));
    }

    if touched.default_strategy {
        if let Some(delta) = diff_strategy(&baseline.default_strategy, &draft.default_strategy, fold)
        {
            commands.push(Command::ChangeDefaultStrategy {
                strategy: delta.into_strategy(),
            });
        }
    }

    if touched.off_variation && baseline.off_variation != draft.off_variation {
        commands.push(Command::ChangeOffVariation {
            variation: draft.off_variation.clone(),
        });
    }

    if touched.reset_sampling_seed {
        commands.push(Command::ResetSamplingSeed);
    }

    if touched.prerequisites {
        let diff = diff_prerequisites(&baseline.prerequisites, &draft.prerequisites);
        commands.extend(diff.removed.into_iter().map(|p| Command::RemovePrerequisite {
            feature_id: p.feature_id,
        }));
        commands.extend(
            diff.added
                .into_iter()
                .map(|prerequisite| Command::AddPrerequisite { prerequisite }),
        );
        commands.extend(
            diff.changed
                .into_iter()
                .map(|prerequisite| Command::ChangePrerequisiteVariation { prerequisite }),
        );
    }

    debug!(commands = commands.len(), "synthesized immediate commands");
    commands
}

fn push_rule_commands(commands: &mut Vec<Command>, diff: RuleDiff) {
    commands.extend(
        diff.removed
            .into_iter()
            .map(|rule_id| Command::DeleteRule { rule_id }),
    );
    commands.extend(diff.added.into_iter().map(|rule| Command::AddRule { rule }));
    if let Some(rule_ids) = diff.reorder {
        commands.push(Command::ChangeRulesOrder { rule_ids });
    }
    for update in diff.updated {
        push_rule_update(commands, update);
    }
}

fn push_rule_update(commands: &mut Vec<Command>, update: RuleUpdate) {
    let RuleUpdate {
        rule_id,
        clauses,
        strategy,
        ..
    } = update;

    for clause_id in clauses.removed {
        commands.push(Command::DeleteClause {
            rule_id: rule_id.clone(),
            clause_id,
        });
    }
    for clause in clauses.added {
        commands.push(Command::AddClause {
            rule_id: rule_id.clone(),
            clause,
        });
    }
    for change in clauses.changed {
        for delta in change.deltas {
            let rule_id = rule_id.clone();
            let clause_id = change.clause_id.clone();
            commands.push(match delta {
                ClauseDelta::Attribute(attribute) => Command::ChangeClauseAttribute {
                    rule_id,
                    clause_id,
                    attribute,
                },
                ClauseDelta::Operator(operator) => Command::ChangeClauseOperator {
                    rule_id,
                    clause_id,
                    operator,
                },
                ClauseDelta::RemovedValue(value) => Command::RemoveClauseValue {
                    rule_id,
                    clause_id,
                    value,
                },
                ClauseDelta::AddedValue(value) => Command::AddClauseValue {
                    rule_id,
                    clause_id,
                    value,
                },
            });
        }
    }

    if let Some(delta) = strategy {
        commands.push(strategy_command(rule_id, delta));
    }
}

fn strategy_command(rule_id: RuleId, delta: StrategyDelta) -> Command {
    match delta {
        StrategyDelta::Replaced(strategy) => Command::ChangeRuleStrategy { rule_id, strategy },
        StrategyDelta::FixedChanged(strategy) => Command::ChangeFixedStrategy { rule_id, strategy },
        StrategyDelta::RolloutChanged(strategy) => {
            Command::ChangeRolloutStrategy { rule_id, strategy }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagline_types::{Clause, Operator, Prerequisite, Rule, Strategy, TargetAssignment};

    use crate::options::TouchedFields;

    fn base() -> TargetingConfiguration {
        let mut config = TargetingConfiguration::new(Strategy::fixed("v1"), "v2");
        config.targets = vec![
            TargetAssignment::new("v1", &["alice"]),
            TargetAssignment::new("v2", &[]),
        ];
        config.rules = vec![Rule::new(
            "r1",
            vec![Clause::compare("c1", "country", Operator::In, &["jp"])],
            Strategy::fixed("v1"),
        )];
        config
    }

    #[test]
    fn untouched_fields_are_skipped() {
        let baseline = base();
        let mut draft = base();
        draft.enabled = true;
        draft.off_variation = "v1".into();

        assert!(synthesize(&baseline, &draft, &SynthesisOptions::default()).is_empty());

        let mut touched = TouchedFields::none();
        touched.off_variation = true;
        assert_eq!(
            synthesize(&baseline, &draft, &SynthesisOptions::new(touched)),
            vec![Command::ChangeOffVariation {
                variation: "v1".into()
            }]
        );
    }

    #[test]
    fn enable_and_disable() {
        let baseline = base();
        let mut draft = base();
        draft.enabled = true;
        let options = SynthesisOptions::all();
        assert_eq!(synthesize(&baseline, &draft, &options), vec![Command::EnableFeature]);
        assert_eq!(synthesize(&draft, &baseline, &options), vec![Command::DisableFeature]);
    }

    #[test]
    fn target_users_removed_then_added() {
        let baseline = base();
        let mut draft = base();
        draft.targets[0].users = vec!["bob".into()];

        let commands = synthesize(&baseline, &draft, &SynthesisOptions::all());
        assert_eq!(
            commands,
            vec![
                Command::RemoveUserFromVariation {
                    variation: "v1".into(),
                    user: "alice".into()
                },
                Command::AddUserToVariation {
                    variation: "v1".into(),
                    user: "bob".into()
                },
            ]
        );
    }

    #[test]
    fn clause_commands_precede_strategy_command() {
        let baseline = base();
        let mut draft = base();
        draft.rules[0].clauses.push(Clause::segment("c2", &["beta"]));
        draft.rules[0].clauses[0].attribute = "region".into();
        draft.rules[0].strategy = Strategy::rollout([("v1", 50_000), ("v2", 50_000)]);

        let kinds: Vec<&str> = synthesize(&baseline, &draft, &SynthesisOptions::all())
            .iter()
            .map(Command::kind_name)
            .collect();
        assert_eq!(
            kinds,
            vec!["AddClause", "ChangeClauseAttribute", "ChangeRuleStrategy"]
        );
    }

    #[test]
    fn deleted_clause_carries_only_ids() {
        let baseline = base();
        let mut draft = base();
        draft.rules[0].clauses.clear();
        assert_eq!(
            synthesize(&baseline, &draft, &SynthesisOptions::all()),
            vec![Command::DeleteClause {
                rule_id: "r1".into(),
                clause_id: "c1".into()
            }]
        );
    }

    #[test]
    fn rollout_weight_change_is_narrow() {
        let mut baseline = base();
        baseline.rules[0].strategy = Strategy::rollout([("v1", 50_000), ("v2", 50_000)]);
        let mut draft = baseline.clone();
        draft.rules[0].strategy = Strategy::rollout([("v1", 10_000), ("v2", 90_000)]);

        let commands = synthesize(&baseline, &draft, &SynthesisOptions::all());
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].kind_name(), "ChangeRolloutStrategy");
    }

    #[test]
    fn fixed_variation_change_respects_folding() {
        let baseline = base();
        let mut draft = base();
        draft.rules[0].strategy = Strategy::fixed("v2");

        let folded = synthesize(&baseline, &draft, &SynthesisOptions::all());
        assert_eq!(
            folded,
            vec![Command::ChangeRuleStrategy {
                rule_id: "r1".into(),
                strategy: Strategy::fixed("v2")
            }]
        );

        let options = SynthesisOptions::all().with_fold_fixed_variation_change(false);
        let narrow = synthesize(&baseline, &draft, &options);
        assert_eq!(narrow.len(), 1);
        assert_eq!(narrow[0].kind_name(), "ChangeFixedStrategy");
    }

    #[test]
    fn reset_is_unconditional() {
        let config = base();
        let mut touched = TouchedFields::none();
        touched.reset_sampling_seed = true;
        assert_eq!(
            synthesize(&config, &config, &SynthesisOptions::new(touched)),
            vec![Command::ResetSamplingSeed]
        );
    }

    #[test]
    fn dropped_variation_removes_its_users() {
        let baseline = base();
        let mut draft = base();
        draft.targets.clear();

        assert_eq!(
            synthesize(&baseline, &draft, &SynthesisOptions::all()),
            vec![Command::RemoveUserFromVariation {
                variation: "v1".into(),
                user: "alice".into()
            }]
        );
        assert_eq!(
            synthesize(&draft, &baseline, &SynthesisOptions::all()),
            vec![Command::AddUserToVariation {
                variation: "v1".into(),
                user: "alice".into()
            }]
        );
    }

    #[test]
    fn prerequisites_removed_added_then_changed() {
        let mut baseline = base();
        baseline.prerequisites = vec![
            Prerequisite::new("billing", "on"),
            Prerequisite::new("payments", "on"),
        ];
        let mut draft = base();
        draft.prerequisites = vec![
            Prerequisite::new("payments", "off"),
            Prerequisite::new("search", "v2"),
        ];

        assert_eq!(
            synthesize(&baseline, &draft, &SynthesisOptions::all()),
            vec![
                Command::RemovePrerequisite {
                    feature_id: "billing".into()
                },
                Command::AddPrerequisite {
                    prerequisite: Prerequisite::new("search", "v2")
                },
                Command::ChangePrerequisiteVariation {
                    prerequisite: Prerequisite::new("payments", "off")
                },
            ]
        );
    }

    #[test]
    fn clause_field_commands_in_order() {
        let baseline = base();
        let mut draft = base();
        let clause = &mut draft.rules[0].clauses[0];
        clause.attribute = "region".into();
        clause.operator = Operator::Equals;
        clause.values = vec!["kr".into()];

        assert_eq!(
            synthesize(&baseline, &draft, &SynthesisOptions::all()),
            vec![
                Command::ChangeClauseAttribute {
                    rule_id: "r1".into(),
                    clause_id: "c1".into(),
                    attribute: "region".into()
                },
                Command::ChangeClauseOperator {
                    rule_id: "r1".into(),
                    clause_id: "c1".into(),
                    operator: Operator::Equals
                },
                Command::RemoveClauseValue {
                    rule_id: "r1".into(),
                    clause_id: "c1".into(),
                    value: "jp".into()
                },
                Command::AddClauseValue {
                    rule_id: "r1".into(),
                    clause_id: "c1".into(),
                    value: "kr".into()
                },
            ]
        );
    }
}
