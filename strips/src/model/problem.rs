use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::sync::Arc;

use super::domain::Domain;
use super::object::{Object, TypeName};
use super::predicate::Literal;
use crate::error::{StripsError, StripsResult};

/// A concrete planning problem: objects, initial facts and goal facts.
///
/// The state is a plain list: order carries no meaning and duplicates are kept.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    name: String,
    #[serde(serialize_with = "domain_name")]
    domain: Arc<Domain>,
    objects: IndexMap<TypeName, Vec<Object>>,
    state: Vec<Literal>,
    goal: Vec<Literal>,
}

fn domain_name<S: Serializer>(domain: &Arc<Domain>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(domain.name())
}

impl Problem {
    /// Build a problem, checking that every object, and every variable of the
    /// initial and goal literals, has a type declared by the domain.
    pub fn new(
        name: impl Into<String>,
        domain: Arc<Domain>,
        objects: Vec<Object>,
        state: Vec<Literal>,
        goal: Vec<Literal>,
    ) -> StripsResult<Self> {
        let mut grouped: IndexMap<TypeName, Vec<Object>> = IndexMap::new();
        for object in objects {
            if !domain.has_type(object.type_name()) {
                return Err(StripsError::UnknownType {
                    object: object.name().to_string(),
                    type_name: object.type_name().clone(),
                });
            }
            grouped
                .entry(object.type_name().clone())
                .or_default()
                .push(object);
        }

        for variable in state.iter().chain(&goal).flat_map(Literal::variables) {
            if !domain.has_type(variable.type_name()) {
                let object = variable.value().map_or(variable.name(), |o| o.name());
                return Err(StripsError::UnknownType {
                    object: object.to_string(),
                    type_name: variable.type_name().clone(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            domain,
            objects: grouped,
            state,
            goal,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    /// Objects grouped by type, in first-seen order.
    pub fn objects(&self) -> &IndexMap<TypeName, Vec<Object>> {
        &self.objects
    }

    pub fn state(&self) -> &[Literal] {
        &self.state
    }

    pub fn goal(&self) -> &[Literal] {
        &self.goal
    }
}
