use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::ClauseId;

/// The family a clause belongs to. Each kind admits a fixed set of operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClauseKind {
    /// Attribute compared against literal values.
    Compare,
    /// Membership in one of the listed user segments.
    Segment,
    /// Attribute compared against a timestamp.
    Date,
    /// Another flag evaluated to one of the listed variations.
    FeatureFlagDependency,
}

impl ClauseKind {
    /// Operators a clause of this kind may carry.
    pub fn legal_operators(&self) -> &'static [Operator] {
        match self {
            Self::Compare => &[
                Operator::Equals,
                Operator::In,
                Operator::StartsWith,
                Operator::EndsWith,
                Operator::PartiallyMatch,
                Operator::Greater,
                Operator::GreaterOrEqual,
                Operator::Less,
                Operator::LessOrEqual,
            ],
            Self::Segment => &[Operator::Segment],
            Self::Date => &[Operator::Before, Operator::After],
            Self::FeatureFlagDependency => &[Operator::FeatureFlag],
        }
    }

    /// Returns `true` if `operator` is legal for this kind.
    pub fn allows(&self, operator: Operator) -> bool {
        self.legal_operators().contains(&operator)
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare => write!(f, "Compare"),
            Self::Segment => write!(f, "Segment"),
            Self::Date => write!(f, "Date"),
            Self::FeatureFlagDependency => write!(f, "FeatureFlagDependency"),
        }
    }
}

/// Comparison operator of a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equals,
    In,
    StartsWith,
    EndsWith,
    PartiallyMatch,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Segment,
    Before,
    After,
    FeatureFlag,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equals => "Equals",
            Self::In => "In",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
            Self::PartiallyMatch => "PartiallyMatch",
            Self::Greater => "Greater",
            Self::GreaterOrEqual => "GreaterOrEqual",
            Self::Less => "Less",
            Self::LessOrEqual => "LessOrEqual",
            Self::Segment => "Segment",
            Self::Before => "Before",
            Self::After => "After",
            Self::FeatureFlag => "FeatureFlag",
        };
        f.write_str(name)
    }
}

/// One atomic condition within a rule.
///
/// `values` is kept in editor order, but the differ treats it as a set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    pub id: ClauseId,
    pub kind: ClauseKind,
    pub attribute: String,
    pub operator: Operator,
    #[serde(default)]
    pub values: Vec<String>,
}

impl Clause {
    /// Create a clause.
    pub fn new(
        id: impl Into<ClauseId>,
        kind: ClauseKind,
        attribute: impl Into<String>,
        operator: Operator,
        values: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            attribute: attribute.into(),
            operator,
            values,
        }
    }

    /// A `Compare` clause.
    pub fn compare(
        id: impl Into<ClauseId>,
        attribute: impl Into<String>,
        operator: Operator,
        values: &[&str],
    ) -> Self {
        Self::new(id, ClauseKind::Compare, attribute, operator, to_strings(values))
    }

    /// A `Segment` clause. Segment clauses have no attribute and always use
    /// the segment operator.
    pub fn segment(id: impl Into<ClauseId>, segment_ids: &[&str]) -> Self {
        Self::new(
            id,
            ClauseKind::Segment,
            String::new(),
            Operator::Segment,
            to_strings(segment_ids),
        )
    }

    /// A `Date` clause with a single unix-seconds value.
    pub fn date(
        id: impl Into<ClauseId>,
        attribute: impl Into<String>,
        operator: Operator,
        unix_seconds: i64,
    ) -> Self {
        Self::new(
            id,
            ClauseKind::Date,
            attribute,
            operator,
            vec![unix_seconds.to_string()],
        )
    }

    /// A `FeatureFlagDependency` clause: the flag named by `feature_id`
    /// (carried in `attribute`) must evaluate to one of `variation_ids`.
    pub fn feature_flag(
        id: impl Into<ClauseId>,
        feature_id: impl Into<String>,
        variation_ids: &[&str],
    ) -> Self {
        Self::new(
            id,
            ClauseKind::FeatureFlagDependency,
            feature_id,
            Operator::FeatureFlag,
            to_strings(variation_ids),
        )
    }

    /// Returns `true` if the operator is legal for the clause kind.
    pub fn is_well_formed(&self) -> bool {
        self.kind.allows(self.operator)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
