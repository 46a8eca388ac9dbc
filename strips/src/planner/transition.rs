//! State transition: applying a grounded action to a node.

use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

use super::grounding::Grounding;
use super::node::{ActionTaken, PlanNode};
use super::unification::{apply_substitution, substitution_for};
use crate::error::{StripsError, StripsResult};
use crate::model::{ActionSchema, Literal};

/// Ground the effects of `action` for the given precondition match.
pub fn ground_effects(action: &ActionSchema, grounding: &Grounding) -> StripsResult<Vec<Literal>> {
    // Groundings from the matcher always unify; hand-built ones may not.
    let subst = substitution_for(action.preconditions(), grounding.matched()).map_err(|err| {
        StripsError::InvalidGrounding {
            action: action.name().to_string(),
            reason: err.to_string(),
        }
    })?;

    action
        .effects()
        .iter()
        .map(|effect| apply_substitution(effect, &subst, action.name()))
        .collect()
}

/// Next state: drop each matched literal once, then append the ground effects.
///
/// Negative effects are appended as explicit negative facts; they do not delete
/// the positive ones. `|next| = |state| - |matched| + |effects|`. A matched
/// literal missing from the state is an [`StripsError::InvalidGrounding`].
pub fn successor_state(
    action: &str,
    state: &[Literal],
    matched: &[Literal],
    effects: Vec<Literal>,
) -> StripsResult<Vec<Literal>> {
    let mut next = state.to_vec();
    for literal in matched {
        let pos = next.iter().position(|l| l == literal).ok_or_else(|| {
            StripsError::InvalidGrounding {
                action: action.to_string(),
                reason: format!("matched literal {} not in state", literal),
            }
        })?;
        next.remove(pos);
    }
    next.extend(effects);
    Ok(next)
}

/// Apply a grounding of `action` to `parent`, producing the child node.
pub fn apply_action(
    parent: &Rc<PlanNode>,
    action: &Arc<ActionSchema>,
    grounding: Grounding,
) -> StripsResult<PlanNode> {
    let effects = ground_effects(action, &grounding)?;
    let state = successor_state(action.name(), parent.state(), grounding.matched(), effects)?;

    let child = PlanNode::child(
        parent,
        state,
        ActionTaken {
            action: Arc::clone(action),
            matched: grounding.into_matched(),
        },
    );
    debug!(
        action = action.name(),
        level = child.level(),
        facts = child.state().len(),
        "applied action"
    );
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{not, Domain, Object, PredicateDecl, Problem, TypeName, Variable};
    use crate::planner::grounding::ground_action;

    fn setup() -> (Rc<PlanNode>, Arc<ActionSchema>) {
        let free = PredicateDecl::new("free", vec![Variable::free("?k", "arm")]);
        let busy = PredicateDecl::new("busy", vec![Variable::free("?k", "arm")]);
        let k = Variable::free("?k", "arm");
        let grab = ActionSchema::new(
            "grab",
            vec![k.clone()],
            vec![],
            vec![free.call([&k]).unwrap()],
            vec![busy.call([&k]).unwrap(), not(free.call([&k]).unwrap())],
        );
        let domain = Arc::new(Domain::new(
            "arms",
            [TypeName::new("arm")],
            vec![free.clone(), busy.clone()],
            vec![grab],
        ));
        let k1 = Object::new("k1", "arm");
        let k2 = Object::new("k2", "arm");
        let problem = Problem::new(
            "p",
            domain.clone(),
            vec![k1.clone(), k2.clone()],
            vec![free.call([&k1]).unwrap(), free.call([&k2]).unwrap()],
            vec![busy.call([&k2]).unwrap()],
        )
        .unwrap();
        let action = Arc::clone(&domain.actions()[0]);
        (Rc::new(PlanNode::root(&problem)), action)
    }

    #[test]
    fn child_state_replaces_matched_with_effects() {
        let (root, grab) = setup();
        let grounding = ground_action(&grab, root.state()).remove(0);
        let child = apply_action(&root, &grab, grounding).unwrap();

        assert_eq!(child.level(), 1);
        assert_eq!(child.state().len(), root.state().len() - 1 + 2);
        assert!(child.state().iter().any(|l| l.is_negative()));
        // parent untouched
        assert_eq!(root.state().len(), 2);
        assert_eq!(child.action_taken().unwrap().action.name(), "grab");
    }

    #[test]
    fn duplicate_matches_are_each_removed_once() {
        let free = PredicateDecl::new("free", vec![Variable::free("?k", "arm")]);
        let fact = free.call([Object::new("k1", "arm")]).unwrap();
        let state = vec![fact.clone(), fact.clone(), fact.clone()];
        let next = successor_state("drop", &state, &[fact.clone(), fact.clone()], vec![]).unwrap();
        assert_eq!(next, vec![fact]);
    }

    #[test]
    fn effect_with_unbound_variable_fails() {
        let free = PredicateDecl::new("free", vec![Variable::free("?k", "arm")]);
        let k = Variable::free("?k", "arm");
        let other = Variable::free("?j", "arm");
        let broken = ActionSchema::new(
            "broken",
            vec![k.clone()],
            vec![],
            vec![free.call([&k]).unwrap()],
            vec![free.call([&other]).unwrap()],
        );
        let state = vec![free.call([Object::new("k1", "arm")]).unwrap()];
        let grounding = ground_action(&broken, &state).remove(0);
        assert!(matches!(
            ground_effects(&broken, &grounding),
            Err(StripsError::UnboundEffectVariable { variable, .. }) if variable == "?j"
        ));
    }

    #[test]
    fn hand_built_grounding_must_unify() {
        let (root, grab) = setup();
        let busy = PredicateDecl::new("busy", vec![Variable::free("?k", "arm")]);
        let wrong = Grounding::new(vec![busy.call([Object::new("k1", "arm")]).unwrap()]);
        assert!(matches!(
            apply_action(&root, &grab, wrong),
            Err(StripsError::InvalidGrounding { .. })
        ));
    }

    #[test]
    fn matched_literal_missing_from_state_is_rejected() {
        let (root, grab) = setup();
        let free = PredicateDecl::new("free", vec![Variable::free("?k", "arm")]);
        let absent = Grounding::new(vec![free.call([Object::new("k9", "arm")]).unwrap()]);
        let result = apply_action(&root, &grab, absent);
        assert!(matches!(
            result,
            Err(StripsError::InvalidGrounding { action, reason })
                if action == "grab" && reason.contains("(free k9)")
        ));
        assert_eq!(root.state().len(), 2);
    }
}
