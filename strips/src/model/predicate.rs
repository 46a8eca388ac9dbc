//! Predicate declarations and the literals built from them.

use serde::{Deserialize, Serialize};

use super::object::Object;
use super::variable::Variable;
use crate::error::{StripsError, StripsResult};

/// Argument passed when instantiating a [`PredicateDecl`].
#[derive(Debug, Clone)]
pub enum Arg {
    /// Ground the slot to this object.
    Object(Object),
    /// Use this schema variable as-is, so that every literal of one action
    /// sharing the variable name refers to the same variable.
    Var(Variable),
}

impl From<Object> for Arg {
    fn from(object: Object) -> Self {
        Arg::Object(object)
    }
}

impl From<&Object> for Arg {
    fn from(object: &Object) -> Self {
        Arg::Object(object.clone())
    }
}

impl From<Variable> for Arg {
    fn from(variable: Variable) -> Self {
        Arg::Var(variable)
    }
}

impl From<&Variable> for Arg {
    fn from(variable: &Variable) -> Self {
        Arg::Var(variable.clone())
    }
}

/// A named relation schema with ordered, typed slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredicateDecl {
    name: String,
    slots: Vec<Variable>,
}

impl PredicateDecl {
    pub fn new(name: impl Into<String>, slots: Vec<Variable>) -> Self {
        Self {
            name: name.into(),
            slots,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[Variable] {
        &self.slots
    }

    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    /// Instantiate this declaration as a positive literal.
    ///
    /// Objects are bound to a copy of the slot template; variables are kept
    /// verbatim. Every argument must have the slot's type.
    pub fn call<I, A>(&self, args: I) -> StripsResult<Literal>
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        if args.len() != self.slots.len() {
            return Err(StripsError::ArityMismatch {
                predicate: self.name.clone(),
                expected: self.slots.len(),
                actual: args.len(),
            });
        }

        let mut variables = Vec::with_capacity(args.len());
        for (slot, arg) in self.slots.iter().zip(args) {
            match arg {
                Arg::Object(object) => variables.push(slot.bind(&object)?),
                Arg::Var(var) => {
                    if var.type_name() != slot.type_name() {
                        return Err(StripsError::TypeMismatch {
                            variable: var.name().to_string(),
                            expected: slot.type_name().clone(),
                            actual: var.type_name().clone(),
                        });
                    }
                    variables.push(var);
                }
            }
        }

        Ok(Literal::Positive(Fact {
            predicate: self.name.clone(),
            variables,
        }))
    }
}

/// A predicate applied to variables, without polarity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    predicate: String,
    variables: Vec<Variable>,
}

impl Fact {
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub(crate) fn with_variables(&self, variables: Vec<Variable>) -> Fact {
        Fact {
            predicate: self.predicate.clone(),
            variables,
        }
    }

    /// True when every variable is bound to an object.
    pub fn is_ground(&self) -> bool {
        self.variables.iter().all(Variable::is_bound)
    }
}

/// A positive or negative fact.
///
/// Negative literals are explicit data: a state contains `(not P)` only if some
/// fact or effect put it there. `P` and `(not P)` are never equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "polarity", content = "fact", rename_all = "lowercase")]
pub enum Literal {
    Positive(Fact),
    Negative(Fact),
}

impl Literal {
    pub fn fact(&self) -> &Fact {
        match self {
            Literal::Positive(fact) | Literal::Negative(fact) => fact,
        }
    }

    pub fn predicate(&self) -> &str {
        self.fact().predicate()
    }

    pub fn variables(&self) -> &[Variable] {
        self.fact().variables()
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Literal::Negative(_))
    }

    /// Flip the polarity.
    pub fn negated(self) -> Literal {
        match self {
            Literal::Positive(fact) => Literal::Negative(fact),
            Literal::Negative(fact) => Literal::Positive(fact),
        }
    }

    /// Same polarity, different variables.
    pub(crate) fn with_variables(&self, variables: Vec<Variable>) -> Literal {
        match self {
            Literal::Positive(fact) => Literal::Positive(fact.with_variables(variables)),
            Literal::Negative(fact) => Literal::Negative(fact.with_variables(variables)),
        }
    }
}

/// Negation of a literal, for writing action effects: `not(on.call([&c, &p])?)`.
pub fn not(literal: Literal) -> Literal {
    literal.negated()
}
