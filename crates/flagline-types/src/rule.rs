use serde::{Deserialize, Serialize};

use crate::clause::Clause;
use crate::identity::RuleId;
use crate::strategy::Strategy;

/// An id-identified set of clauses plus the strategy applied on match.
///
/// Clause order is not significant for matching; clause identity is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    #[serde(default)]
    pub clauses: Vec<Clause>,
    pub strategy: Strategy,
}

impl Rule {
    pub fn new(id: impl Into<RuleId>, clauses: Vec<Clause>, strategy: Strategy) -> Self {
        Self {
            id: id.into(),
            clauses,
            strategy,
        }
    }
}
