use thiserror::Error;

/// Errors produced by identifier parsing and snapshot validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("empty {kind} id")]
    EmptyId { kind: &'static str },

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("operator {operator} is not legal for {kind} clause {clause}")]
    IllegalOperator {
        clause: String,
        kind: String,
        operator: String,
    },

    #[error("rollout weights for {scope} sum to {actual}, expected {expected}")]
    WeightSum {
        scope: String,
        expected: u32,
        actual: u64,
    },

    #[error("target variation order differs at index {index}: baseline {baseline}, draft {draft}")]
    TargetOrderMismatch {
        index: usize,
        baseline: String,
        draft: String,
    },

    #[error("target count differs: baseline {baseline}, draft {draft}")]
    TargetCountMismatch { baseline: usize, draft: usize },
}

pub type TypeResult<T> = Result<T, TypeError>;
