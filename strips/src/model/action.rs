use serde::{Deserialize, Serialize};

use super::predicate::Literal;
use super::variable::Variable;

/// A STRIPS operator.
///
/// Preconditions and effects share variables by name. Every variable used in
/// `effects` must also appear in `preconditions`, otherwise applying the action
/// fails with [`StripsError::UnboundEffectVariable`](crate::StripsError::UnboundEffectVariable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSchema {
    name: String,
    parameters: Vec<Variable>,
    free_variables: Vec<Variable>,
    preconditions: Vec<Literal>,
    effects: Vec<Literal>,
}

impl ActionSchema {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<Variable>,
        free_variables: Vec<Variable>,
        preconditions: Vec<Literal>,
        effects: Vec<Literal>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            free_variables,
            preconditions,
            effects,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Variable] {
        &self.parameters
    }

    /// Variables that are not parameters but still get bound by the preconditions.
    pub fn free_variables(&self) -> &[Variable] {
        &self.free_variables
    }

    pub fn preconditions(&self) -> &[Literal] {
        &self.preconditions
    }

    pub fn effects(&self) -> &[Literal] {
        &self.effects
    }

    /// Number of negative preconditions.
    pub fn negative_preconditions(&self) -> usize {
        self.preconditions.iter().filter(|p| p.is_negative()).count()
    }
}
