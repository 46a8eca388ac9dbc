//! Search nodes.
//!
//! A node owns a private copy of its state. Children keep their parent alive
//! through an `Rc`, so the action sequence can be recovered from any node.

use std::rc::Rc;
use std::sync::Arc;

use super::grounding::{ground_action, Grounding};
use super::plan::{Plan, PlanStep};
use crate::model::{ActionSchema, Domain, Literal, Problem};

/// The action applied to the parent to produce a node.
#[derive(Debug, Clone)]
pub struct ActionTaken {
    pub action: Arc<ActionSchema>,
    /// Literals that filled the preconditions, in precondition order.
    pub matched: Vec<Literal>,
}

#[derive(Debug)]
pub struct PlanNode {
    domain: Arc<Domain>,
    state: Vec<Literal>,
    goal: Vec<Literal>,
    explored: bool,
    parent: Option<Rc<PlanNode>>,
    action_taken: Option<ActionTaken>,
    level: usize,
}

impl PlanNode {
    /// Root node for a problem: level 0, no parent.
    pub fn root(problem: &Problem) -> Self {
        Self {
            domain: Arc::clone(problem.domain()),
            state: problem.state().to_vec(),
            goal: problem.goal().to_vec(),
            explored: false,
            parent: None,
            action_taken: None,
            level: 0,
        }
    }

    pub(crate) fn child(parent: &Rc<PlanNode>, state: Vec<Literal>, action_taken: ActionTaken) -> Self {
        Self {
            domain: Arc::clone(&parent.domain),
            state,
            goal: parent.goal.clone(),
            explored: false,
            parent: Some(Rc::clone(parent)),
            action_taken: Some(action_taken),
            level: parent.level + 1,
        }
    }

    pub fn domain(&self) -> &Arc<Domain> {
        &self.domain
    }

    pub fn state(&self) -> &[Literal] {
        &self.state
    }

    pub fn goal(&self) -> &[Literal] {
        &self.goal
    }

    pub fn parent(&self) -> Option<&Rc<PlanNode>> {
        self.parent.as_ref()
    }

    pub fn action_taken(&self) -> Option<&ActionTaken> {
        self.action_taken.as_ref()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    pub fn mark_explored(&mut self) {
        self.explored = true;
    }

    /// Every goal literal appears in the state. Order and extra facts do not matter.
    pub fn is_goal(&self) -> bool {
        self.goal.iter().all(|g| self.state.contains(g))
    }

    /// Groundings of one action in this node's state.
    pub fn applicable_action(&self, action: &ActionSchema) -> Vec<Grounding> {
        ground_action(action, &self.state)
    }

    /// Groundings of every domain action, in domain order.
    pub fn applicable_actions(&self) -> Vec<(Arc<ActionSchema>, Vec<Grounding>)> {
        self.domain
            .actions()
            .iter()
            .map(|action| (Arc::clone(action), self.applicable_action(action)))
            .collect()
    }

    /// Actions leading from the root to this node, oldest first.
    pub fn plan(&self) -> Plan {
        let mut steps = Vec::with_capacity(self.level);
        let mut current = Some(self);
        while let Some(node) = current {
            if let Some(taken) = &node.action_taken {
                steps.push(PlanStep {
                    action: taken.action.name().to_string(),
                    matched: taken.matched.clone(),
                });
            }
            current = node.parent.as_deref();
        }
        steps.reverse();
        Plan::new(steps)
    }
}
