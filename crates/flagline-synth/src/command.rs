use serde::{Deserialize, Serialize};

use flagline_types::{
    Clause, ClauseId, FeatureId, FixedStrategy, Operator, Prerequisite, RolloutStrategy, Rule,
    RuleId, Strategy, UserId, VariationId,
};

/// One atomic, immediately applicable mutation.
///
/// Serializes externally tagged by [`Command::kind_name`], which is the
/// stable command-kind name the transport puts on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    EnableFeature,
    DisableFeature,
    AddUserToVariation {
        variation: VariationId,
        user: UserId,
    },
    RemoveUserFromVariation {
        variation: VariationId,
        user: UserId,
    },
    AddRule {
        rule: Rule,
    },
    DeleteRule {
        rule_id: RuleId,
    },
    /// Carries the complete target order.
    ChangeRulesOrder {
        rule_ids: Vec<RuleId>,
    },
    AddClause {
        rule_id: RuleId,
        clause: Clause,
    },
    DeleteClause {
        rule_id: RuleId,
        clause_id: ClauseId,
    },
    ChangeClauseAttribute {
        rule_id: RuleId,
        clause_id: ClauseId,
        attribute: String,
    },
    ChangeClauseOperator {
        rule_id: RuleId,
        clause_id: ClauseId,
        operator: Operator,
    },
    AddClauseValue {
        rule_id: RuleId,
        clause_id: ClauseId,
        value: String,
    },
    RemoveClauseValue {
        rule_id: RuleId,
        clause_id: ClauseId,
        value: String,
    },
    /// Strategy kind changed (or a folded fixed variation change).
    ChangeRuleStrategy {
        rule_id: RuleId,
        strategy: Strategy,
    },
    ChangeFixedStrategy {
        rule_id: RuleId,
        strategy: FixedStrategy,
    },
    ChangeRolloutStrategy {
        rule_id: RuleId,
        strategy: RolloutStrategy,
    },
    ChangeDefaultStrategy {
        strategy: Strategy,
    },
    ChangeOffVariation {
        variation: VariationId,
    },
    AddPrerequisite {
        prerequisite: Prerequisite,
    },
    RemovePrerequisite {
        feature_id: FeatureId,
    },
    ChangePrerequisiteVariation {
        prerequisite: Prerequisite,
    },
    ResetSamplingSeed,
}

impl Command {
    /// Stable command-kind name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::EnableFeature => "EnableFeature",
            Self::DisableFeature => "DisableFeature",
            Self::AddUserToVariation { .. } => "AddUserToVariation",
            Self::RemoveUserFromVariation { .. } => "RemoveUserFromVariation",
            Self::AddRule { .. } => "AddRule",
            Self::DeleteRule { .. } => "DeleteRule",
            Self::ChangeRulesOrder { .. } => "ChangeRulesOrder",
            Self::AddClause { .. } => "AddClause",
            Self::DeleteClause { .. } => "DeleteClause",
            Self::ChangeClauseAttribute { .. } => "ChangeClauseAttribute",
            Self::ChangeClauseOperator { .. } => "ChangeClauseOperator",
            Self::AddClauseValue { .. } => "AddClauseValue",
            Self::RemoveClauseValue { .. } => "RemoveClauseValue",
            Self::ChangeRuleStrategy { .. } => "ChangeRuleStrategy",
            Self::ChangeFixedStrategy { .. } => "ChangeFixedStrategy",
            Self::ChangeRolloutStrategy { .. } => "ChangeRolloutStrategy",
            Self::ChangeDefaultStrategy { .. } => "ChangeDefaultStrategy",
            Self::ChangeOffVariation { .. } => "ChangeOffVariation",
            Self::AddPrerequisite { .. } => "AddPrerequisite",
            Self::RemovePrerequisite { .. } => "RemovePrerequisite",
            Self::ChangePrerequisiteVariation { .. } => "ChangePrerequisiteVariation",
            Self::ResetSamplingSeed => "ResetSamplingSeed",
        }
    }

    /// The rule this command targets, if it is rule-scoped.
    ///
    /// `ChangeRulesOrder` spans every rule and returns `None`.
    pub fn rule_id(&self) -> Option<&RuleId> {
        match self {
            Self::AddRule { rule } => Some(&rule.id),
            Self::DeleteRule { rule_id }
            | Self::AddClause { rule_id, .. }
            | Self::DeleteClause { rule_id, .. }
            | Self::ChangeClauseAttribute { rule_id, .. }
            | Self::ChangeClauseOperator { rule_id, .. }
            | Self::AddClauseValue { rule_id, .. }
            | Self::RemoveClauseValue { rule_id, .. }
            | Self::ChangeRuleStrategy { rule_id, .. }
            | Self::ChangeFixedStrategy { rule_id, .. }
            | Self::ChangeRolloutStrategy { rule_id, .. } => Some(rule_id),
            Self::EnableFeature
            | Self::DisableFeature
            | Self::AddUserToVariation { .. }
            | Self::RemoveUserFromVariation { .. }
            | Self::ChangeRulesOrder { .. }
            | Self::ChangeDefaultStrategy { .. }
            | Self::ChangeOffVariation { .. }
            | Self::AddPrerequisite { .. }
            | Self::RemovePrerequisite { .. }
            | Self::ChangePrerequisiteVariation { .. }
            | Self::ResetSamplingSeed => None,
        }
    }
}
