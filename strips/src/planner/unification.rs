//! Literal unification for STRIPS schemas
//!
//! Matches schema literals (free variables) against ground literals from a state,
//! accumulating a substitution from schema variable names to objects. A variable
//! that shows up in several preconditions must map to the same object everywhere.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{StripsError, StripsResult};
use crate::model::{Literal, Object, Variable};

/// A substitution maps schema variable names to objects
pub type Substitution = BTreeMap<String, Object>;

/// Reason a schema literal does not unify with a ground literal
#[derive(Debug, Clone, PartialEq)]
pub enum UnificationError {
    /// Different predicate names or different polarity
    LiteralMismatch { pattern: String, ground: String },
    /// Slot counts differ
    ArityMismatch { pattern: usize, ground: usize },
    /// The state literal has a free variable in this slot
    UngroundSlot(String),
    /// Slot types differ
    TypeMismatch(String),
    /// The variable is already bound to a different object
    Conflict {
        variable: String,
        bound: String,
        found: String,
    },
}

impl fmt::Display for UnificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnificationError::LiteralMismatch { pattern, ground } => {
                write!(f, "Cannot unify {} with {}", pattern, ground)
            }
            UnificationError::ArityMismatch { pattern, ground } => {
                write!(f, "Arity mismatch: {} slots against {}", pattern, ground)
            }
            UnificationError::UngroundSlot(name) => {
                write!(f, "State literal has unbound variable {}", name)
            }
            UnificationError::TypeMismatch(name) => {
                write!(f, "Slot type mismatch for variable {}", name)
            }
            UnificationError::Conflict {
                variable,
                bound,
                found,
            } => {
                write!(f, "{} is bound to {} but found {}", variable, bound, found)
            }
        }
    }
}

impl std::error::Error for UnificationError {}

fn describe(literal: &Literal) -> String {
    let polarity = if literal.is_negative() { "not " } else { "" };
    format!("{}{}", polarity, literal.predicate())
}

/// Unify a schema literal with a ground literal
pub fn unify(pattern: &Literal, ground: &Literal) -> Result<Substitution, UnificationError> {
    unify_with_substitution(pattern, ground, &Substitution::new())
}

/// Unify a schema literal with a ground literal, extending an existing substitution
pub fn unify_with_substitution(
    pattern: &Literal,
    ground: &Literal,
    subst: &Substitution,
) -> Result<Substitution, UnificationError> {
    if pattern.is_negative() != ground.is_negative() || pattern.predicate() != ground.predicate()
    {
        return Err(UnificationError::LiteralMismatch {
            pattern: describe(pattern),
            ground: describe(ground),
        });
    }
    if pattern.variables().len() != ground.variables().len() {
        return Err(UnificationError::ArityMismatch {
            pattern: pattern.variables().len(),
            ground: ground.variables().len(),
        });
    }

    let mut subst = subst.clone();
    for (var, slot) in pattern.variables().iter().zip(ground.variables()) {
        bind_variable(var, slot, &mut subst)?;
    }
    Ok(subst)
}

/// Bind one schema variable against one ground slot
fn bind_variable(
    var: &Variable,
    slot: &Variable,
    subst: &mut Substitution,
) -> Result<(), UnificationError> {
    let object = slot
        .value()
        .ok_or_else(|| UnificationError::UngroundSlot(slot.name().to_string()))?;
    if var.type_name() != slot.type_name() {
        return Err(UnificationError::TypeMismatch(var.name().to_string()));
    }

    // A slot already bound in the schema is a constant
    let expected = match var.value() {
        Some(constant) => Some(constant),
        None => subst.get(var.name()),
    };
    match expected {
        Some(bound) if bound.name() != object.name() => Err(UnificationError::Conflict {
            variable: var.name().to_string(),
            bound: bound.name().to_string(),
            found: object.name().to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            subst.insert(var.name().to_string(), object.clone());
            Ok(())
        }
    }
}

/// Walk preconditions against the literals matched to them (same order)
pub fn substitution_for(
    preconditions: &[Literal],
    matched: &[Literal],
) -> Result<Substitution, UnificationError> {
    preconditions
        .iter()
        .zip(matched)
        .try_fold(Substitution::new(), |subst, (pattern, ground)| {
            unify_with_substitution(pattern, ground, &subst)
        })
}

/// Ground a schema literal. Fails if it mentions a variable the substitution lacks.
pub fn apply_substitution(
    literal: &Literal,
    subst: &Substitution,
    action: &str,
) -> StripsResult<Literal> {
    let variables = literal
        .variables()
        .iter()
        .map(|var| {
            if var.is_bound() {
                return Ok(var.clone());
            }
            let object =
                subst
                    .get(var.name())
                    .ok_or_else(|| StripsError::UnboundEffectVariable {
                        action: action.to_string(),
                        variable: var.name().to_string(),
                    })?;
            var.bind(object)
        })
        .collect::<StripsResult<Vec<_>>>()?;
    Ok(literal.with_variables(variables))
}
