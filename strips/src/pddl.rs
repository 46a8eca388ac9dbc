//! PDDL rendering for domains, problems and their parts.
//!
//! Output only: the planner never parses PDDL.

use std::fmt;

use crate::model::{ActionSchema, Domain, Literal, Object, PredicateDecl, Problem, Variable};

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name(), self.type_name())
    }
}

/// Bound: the object name. Free: `?name - type`.
impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(object) => f.write_str(object.name()),
            None => write!(f, "{} - {}", self.name(), self.type_name()),
        }
    }
}

impl fmt::Display for PredicateDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.name(), join(self.slots(), " "))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<&str> = self
            .variables()
            .iter()
            .map(|v| v.value().map_or(v.name(), Object::name))
            .collect();
        let atom = format!("({} {})", self.predicate(), args.join(" "));
        match self {
            Literal::Positive(_) => f.write_str(&atom),
            Literal::Negative(_) => write!(f, "(not {})", atom),
        }
    }
}

impl fmt::Display for ActionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "(:action {}", self.name())?;
        write!(f, "        :parameters   ({})", join(self.parameters(), " "))?;
        if !self.free_variables().is_empty() {
            write!(
                f,
                "\n        :vars         ({})",
                join(self.free_variables(), " ")
            )?;
        }
        writeln!(f)?;
        writeln!(f, "        :precondition {}", conjunction(self.preconditions()))?;
        writeln!(f, "        :effect       {}", conjunction(self.effects()))?;
        write!(f, "    )")
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<&str> = self.types().map(|t| t.as_str()).collect();
        writeln!(f, "(define (domain {})", self.name())?;
        writeln!(f, "    (:requirements :strips :typing)")?;
        writeln!(f, "    (:types")?;
        writeln!(f, "        {}", types.join("\n        "))?;
        writeln!(f, "    )")?;
        writeln!(f, "    (:predicates")?;
        writeln!(f, "        {}", join(self.predicates(), "\n        "))?;
        writeln!(f, "    )")?;
        for action in self.actions() {
            writeln!(f, "    {}", action)?;
        }
        writeln!(f, ")")
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objects: Vec<String> = self
            .objects()
            .iter()
            .map(|(type_name, objects)| {
                let names: Vec<&str> = objects.iter().map(Object::name).collect();
                format!("{} - {}", names.join(" "), type_name)
            })
            .collect();

        writeln!(f, "(define (problem {})", self.name())?;
        writeln!(f, "    (:domain {})", self.domain().name())?;
        writeln!(f, "    (:objects\n      {})", objects.join("\n      "))?;
        writeln!(f, "    (:init\n      {})", join(self.state(), "\n      "))?;
        writeln!(f, "    (:goal\n      {})", conjunction(self.goal()))?;
        writeln!(f, ")")
    }
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// `(and ...)` around two or more literals.
fn conjunction(literals: &[Literal]) -> String {
    let body = join(literals, " ");
    if literals.len() >= 2 {
        format!("(and {})", body)
    } else {
        body
    }
}
