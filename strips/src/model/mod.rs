//! Planning data model: types, objects, variables, predicates, actions,
//! domains and problems.

pub mod action;
pub mod domain;
pub mod object;
pub mod predicate;
pub mod problem;
pub mod variable;

pub use action::ActionSchema;
pub use domain::Domain;
pub use object::{Object, TypeName};
pub use predicate::{not, Arg, Fact, Literal, PredicateDecl};
pub use problem::Problem;
pub use variable::Variable;
