use indexmap::IndexSet;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::action::ActionSchema;
use super::object::TypeName;
use super::predicate::PredicateDecl;
use crate::error::{StripsError, StripsResult};

/// The static description of a world: its types, predicates and actions.
/// Immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Domain {
    name: String,
    types: IndexSet<TypeName>,
    predicates: Vec<PredicateDecl>,
    actions: Vec<Arc<ActionSchema>>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl Domain {
    pub fn new(
        name: impl Into<String>,
        types: impl IntoIterator<Item = TypeName>,
        predicates: Vec<PredicateDecl>,
        actions: Vec<ActionSchema>,
    ) -> Self {
        // Later declarations shadow earlier ones with the same name.
        let by_name = predicates
            .iter()
            .enumerate()
            .map(|(idx, decl)| (decl.name().to_string(), idx))
            .collect();

        Self {
            name: name.into(),
            types: types.into_iter().collect(),
            predicates,
            actions: actions.into_iter().map(Arc::new).collect(),
            by_name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeName> {
        self.types.iter()
    }

    pub fn has_type(&self, type_name: &TypeName) -> bool {
        self.types.contains(type_name)
    }

    pub fn predicates(&self) -> &[PredicateDecl] {
        &self.predicates
    }

    pub fn actions(&self) -> &[Arc<ActionSchema>] {
        &self.actions
    }

    /// Look up a predicate declaration by name.
    pub fn declaration(&self, name: &str) -> StripsResult<&PredicateDecl> {
        self.by_name
            .get(name)
            .map(|&idx| &self.predicates[idx])
            .ok_or_else(|| StripsError::UnknownPredicate(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variable;

    fn domain() -> Domain {
        Domain::new(
            "tiny",
            [TypeName::new("arm"), TypeName::new("arm"), TypeName::new("stack")],
            vec![
                PredicateDecl::new("free", vec![Variable::free("?k", "arm")]),
                PredicateDecl::new("empty", vec![Variable::free("?p", "stack")]),
            ],
            vec![],
        )
    }

    #[test]
    fn declaration_lookup_by_name() {
        let d = domain();
        assert_eq!(d.declaration("empty").unwrap().arity(), 1);
        assert!(matches!(
            d.declaration("holding"),
            Err(StripsError::UnknownPredicate(name)) if name == "holding"
        ));
    }

    #[test]
    fn types_are_deduplicated_in_order() {
        let d = domain();
        let types: Vec<&str> = d.types().map(TypeName::as_str).collect();
        assert_eq!(types, vec!["arm", "stack"]);
        assert!(d.has_type(&TypeName::new("stack")));
        assert!(!d.has_type(&TypeName::new("container")));
    }
}
