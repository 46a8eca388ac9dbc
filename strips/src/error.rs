//! Error types shared by the planner crate.
//!
//! A failed search is not an error: it is reported as
//! [`SearchOutcome::NoPlan`](crate::planner::SearchOutcome::NoPlan). The variants
//! below describe malformed domains, problems and I/O failures.

use thiserror::Error;

use crate::model::TypeName;

/// Errors raised while building or executing a planning problem
#[derive(Debug, Error)]
pub enum StripsError {
    #[error("Type mismatch for variable '{variable}': expected {expected}, got {actual}")]
    TypeMismatch {
        variable: String,
        expected: TypeName,
        actual: TypeName,
    },

    #[error("Predicate '{predicate}' takes {expected} arguments, got {actual}")]
    ArityMismatch {
        predicate: String,
        expected: usize,
        actual: usize,
    },

    #[error("Effect of action '{action}' uses variable '{variable}' with no precondition binding")]
    UnboundEffectVariable { action: String, variable: String },

    #[error("Grounding does not fit action '{action}': {reason}")]
    InvalidGrounding { action: String, reason: String },

    #[error("Unknown predicate: {0}")]
    UnknownPredicate(String),

    #[error("Unknown object: {0}")]
    UnknownObject(String),

    #[error("Object '{object}' has type {type_name}, which the domain does not declare")]
    UnknownType { object: String, type_name: TypeName },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StripsResult<T> = Result<T, StripsError>;
