//! Typed variables.
//!
//! An unbound variable is a schema-level placeholder (`?c - container`); a bound
//! variable carries the object it was grounded to. Binding is checked against the
//! variable type and returns a new value instead of mutating in place.

use serde::{Deserialize, Serialize};

use super::object::{Object, TypeName};
use crate::error::{StripsError, StripsResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    #[serde(rename = "type")]
    type_name: TypeName,
    value: Option<Object>,
}

impl Variable {
    /// Create an unbound variable. Names conventionally start with `?`.
    pub fn free(name: impl Into<String>, type_name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn value(&self) -> Option<&Object> {
        self.value.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    /// Return a copy of this variable bound to `object`.
    pub fn bind(&self, object: &Object) -> StripsResult<Variable> {
        if object.type_name() != &self.type_name {
            return Err(StripsError::TypeMismatch {
                variable: self.name.clone(),
                expected: self.type_name.clone(),
                actual: object.type_name().clone(),
            });
        }
        Ok(Variable {
            name: self.name.clone(),
            type_name: self.type_name.clone(),
            value: Some(object.clone()),
        })
    }

    /// Drop the binding, turning this back into a schema variable.
    pub fn unbind(&mut self) {
        self.value = None;
    }
}

/// Same type, and either both bound to objects of the same name or both free
/// with the same name.
impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        if self.type_name != other.type_name {
            return false;
        }
        match (&self.value, &other.value) {
            (Some(a), Some(b)) => a.name() == b.name(),
            (None, None) => self.name == other.name,
            _ => false,
        }
    }
}

impl Eq for Variable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_rejects_wrong_type() {
        let arm = Variable::free("?k", "arm");
        let result = arm.bind(&Object::new("ca", "container"));
        assert!(matches!(result, Err(StripsError::TypeMismatch { .. })));
        assert!(!arm.is_bound());
    }

    #[test]
    fn bound_variables_compare_by_object_name() {
        let k1 = Object::new("k1", "arm");
        let a = Variable::free("?k", "arm").bind(&k1).unwrap();
        let b = Variable::free("?other", "arm").bind(&k1).unwrap();
        assert_eq!(a, b);

        let c = Variable::free("?k", "arm")
            .bind(&Object::new("k2", "arm"))
            .unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn free_variables_compare_by_name() {
        assert_eq!(Variable::free("?k", "arm"), Variable::free("?k", "arm"));
        assert_ne!(Variable::free("?k", "arm"), Variable::free("?j", "arm"));
        assert_ne!(Variable::free("?k", "arm"), Variable::free("?k", "stack"));
    }

    #[test]
    fn bound_never_equals_free() {
        let free = Variable::free("?k", "arm");
        let bound = free.bind(&Object::new("?k", "arm")).unwrap();
        assert_ne!(free, bound);
        assert_ne!(bound, free);
    }

    #[test]
    fn unbind_clears_value() {
        let mut v = Variable::free("?k", "arm")
            .bind(&Object::new("k1", "arm"))
            .unwrap();
        v.unbind();
        assert!(v.value().is_none());
    }
}
