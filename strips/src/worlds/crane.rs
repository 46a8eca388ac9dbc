//! Dock-worker crane world.
//!
//! Two crane arms move containers between four stacks. Every stack bottoms out
//! on a shared `pallet` container, so an empty stack has the pallet at its top.

use clap::ValueEnum;
use std::sync::Arc;

use crate::error::{StripsError, StripsResult};
use crate::model::{
    not, ActionSchema, Domain, Literal, Object, PredicateDecl, Problem, TypeName, Variable,
};

pub const CONTAINER: &str = "container";
pub const STACK: &str = "stack";
pub const ARM: &str = "arm";

/// Goal presets for [`CraneWorld::problem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CraneGoal {
    /// `cf` on top of the empty stack `p2`. Two actions.
    TopOfP2,
    /// Rebuild every container on `p2`/`q2`. Far beyond what blind BFS solves.
    Rearrange,
}

pub struct CraneWorld {
    domain: Arc<Domain>,
    objects: Vec<Object>,
}

impl CraneWorld {
    pub fn new() -> StripsResult<Self> {
        let objects = ["ca", "cb", "cc", "cd", "ce", "cf", "pallet"]
            .iter()
            .map(|name| Object::new(*name, CONTAINER))
            .chain(["k1", "k2"].iter().map(|name| Object::new(*name, ARM)))
            .chain(
                ["p1", "q1", "p2", "q2"]
                    .iter()
                    .map(|name| Object::new(*name, STACK)),
            )
            .collect();

        Ok(Self {
            domain: Arc::new(build_domain()?),
            objects,
        })
    }

    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    pub fn object(&self, name: &str) -> StripsResult<&Object> {
        self.objects
            .iter()
            .find(|o| o.name() == name)
            .ok_or_else(|| StripsError::UnknownObject(name.to_string()))
    }

    /// Ground literal `predicate(objects...)` by names.
    pub fn fact(&self, predicate: &str, objects: &[&str]) -> StripsResult<Literal> {
        let args = objects
            .iter()
            .map(|name| self.object(name))
            .collect::<StripsResult<Vec<_>>>()?;
        self.domain.declaration(predicate)?.call(args)
    }

    /// `cc/cb/ca` on `p1`, `cf/ce/cd` on `q1`, `p2` and `q2` empty, both arms free.
    pub fn initial_state(&self) -> StripsResult<Vec<Literal>> {
        let facts: [(&str, [&str; 2]); 16] = [
            ("on", ["ca", "p1"]),
            ("on", ["cb", "p1"]),
            ("on", ["cc", "p1"]),
            ("on", ["cd", "q1"]),
            ("on", ["ce", "q1"]),
            ("on", ["cf", "q1"]),
            ("on_top", ["ca", "pallet"]),
            ("on_top", ["cb", "ca"]),
            ("on_top", ["cc", "cb"]),
            ("on_top", ["cd", "pallet"]),
            ("on_top", ["ce", "cd"]),
            ("on_top", ["cf", "ce"]),
            ("at_the_top", ["cc", "p1"]),
            ("at_the_top", ["cf", "q1"]),
            ("at_the_top", ["pallet", "p2"]),
            ("at_the_top", ["pallet", "q2"]),
        ];
        let mut state = facts
            .iter()
            .map(|(predicate, args)| self.fact(predicate, args))
            .collect::<StripsResult<Vec<_>>>()?;
        state.push(self.fact("free", &["k1"])?);
        state.push(self.fact("free", &["k2"])?);
        Ok(state)
    }

    pub fn goal(&self, goal: CraneGoal) -> StripsResult<Vec<Literal>> {
        match goal {
            CraneGoal::TopOfP2 => Ok(vec![self.fact("at_the_top", &["cf", "p2"])?]),
            CraneGoal::Rearrange => [
                ["ca", "p2"],
                ["cb", "q2"],
                ["cc", "p2"],
                ["cd", "q2"],
                ["ce", "q2"],
                ["cf", "q2"],
            ]
            .iter()
            .map(|args| self.fact("on", args))
            .collect(),
        }
    }

    pub fn problem(&self, goal: CraneGoal) -> StripsResult<Problem> {
        Problem::new(
            "dwrpb1",
            Arc::clone(&self.domain),
            self.objects.clone(),
            self.initial_state()?,
            self.goal(goal)?,
        )
    }
}

fn build_domain() -> StripsResult<Domain> {
    let c = Variable::free("?c", CONTAINER);
    let other = Variable::free("?other", CONTAINER);
    let k = Variable::free("?k", ARM);
    let p = Variable::free("?p", STACK);

    let holding = PredicateDecl::new("holding", vec![k.clone(), c.clone()]);
    let free = PredicateDecl::new("free", vec![k.clone()]);
    let on = PredicateDecl::new("on", vec![c.clone(), p.clone()]);
    let at_the_top = PredicateDecl::new("at_the_top", vec![c.clone(), p.clone()]);
    let on_top = PredicateDecl::new(
        "on_top",
        vec![
            Variable::free("?k1", CONTAINER),
            Variable::free("?k2", CONTAINER),
        ],
    );

    let pick_up = ActionSchema::new(
        "pick-up",
        vec![k.clone(), c.clone(), p.clone()],
        vec![other.clone()],
        vec![
            free.call([&k])?,
            on.call([&c, &p])?,
            at_the_top.call([&c, &p])?,
            on_top.call([&c, &other])?,
        ],
        vec![
            holding.call([&k, &c])?,
            at_the_top.call([&other, &p])?,
            not(on.call([&c, &p])?),
            not(at_the_top.call([&c, &p])?),
            not(on_top.call([&c, &other])?),
            not(free.call([&k])?),
        ],
    );

    let put_down = ActionSchema::new(
        "put-down",
        vec![k.clone(), c.clone(), p.clone()],
        vec![other.clone()],
        vec![holding.call([&k, &c])?, at_the_top.call([&other, &p])?],
        vec![
            on.call([&c, &p])?,
            at_the_top.call([&c, &p])?,
            on_top.call([&c, &other])?,
            not(at_the_top.call([&other, &p])?),
            not(holding.call([&k, &c])?),
            free.call([&k])?,
        ],
    );

    Ok(Domain::new(
        "platform-worker-robot",
        [CONTAINER, STACK, ARM].map(TypeName::from),
        vec![holding, free, on, at_the_top, on_top],
        vec![pick_up, put_down],
    ))
}
