//! Action grounding.
//!
//! Every `k`-subset of the state (`k` = number of preconditions) is a candidate.
//! A candidate is kept when its literals can be paired one-to-one with the
//! preconditions: same polarity counts, same predicate names, and one consistent
//! binding for every schema variable across all pairs.
//!
//! The enumeration is `O(C(n, k))` per action and node, which bounds the size of
//! the problems this planner handles.

use itertools::Itertools;
use serde::Serialize;
use tracing::trace;

use super::unification::{unify_with_substitution, Substitution};
use crate::model::{ActionSchema, Literal};

/// State literals filling an action's preconditions, aligned with
/// [`ActionSchema::preconditions`]: `matched()[i]` fills precondition `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grounding {
    matched: Vec<Literal>,
}

impl Grounding {
    /// Wrap literals already aligned with an action's preconditions.
    pub fn new(matched: Vec<Literal>) -> Self {
        Self { matched }
    }

    pub fn matched(&self) -> &[Literal] {
        &self.matched
    }

    pub fn into_matched(self) -> Vec<Literal> {
        self.matched
    }
}

/// All valid groundings of `action` in `state`.
pub fn ground_action(action: &ActionSchema, state: &[Literal]) -> Vec<Grounding> {
    let k = action.preconditions().len();
    let mut candidates = 0usize;
    let groundings: Vec<Grounding> = state
        .iter()
        .combinations(k)
        .inspect(|_| candidates += 1)
        .filter_map(|subset| verify_action(action, &subset))
        .collect();

    trace!(
        action = action.name(),
        candidates,
        valid = groundings.len(),
        "grounded action"
    );
    groundings
}

/// Check one candidate subset against the preconditions of `action`.
pub fn verify_action(action: &ActionSchema, candidate: &[&Literal]) -> Option<Grounding> {
    let preconditions = action.preconditions();
    if candidate.len() != preconditions.len() {
        return None;
    }

    let negatives = candidate.iter().filter(|l| l.is_negative()).count();
    if negatives != action.negative_preconditions() {
        return None;
    }

    if predicate_profile(candidate.iter().copied()) != predicate_profile(preconditions.iter()) {
        return None;
    }

    let mut used = vec![false; candidate.len()];
    let mut order = Vec::with_capacity(candidate.len());
    if pair(preconditions, candidate, &Substitution::new(), &mut used, &mut order) {
        Some(Grounding {
            matched: order.into_iter().map(|i| candidate[i].clone()).collect(),
        })
    } else {
        None
    }
}

/// Sorted predicate names, negatives first then positives.
fn predicate_profile<'a>(literals: impl Iterator<Item = &'a Literal>) -> (Vec<&'a str>, Vec<&'a str>) {
    let (mut negative, mut positive): (Vec<&Literal>, Vec<&Literal>) =
        literals.partition(|l| l.is_negative());
    negative.sort_by(|a, b| a.predicate().cmp(b.predicate()));
    positive.sort_by(|a, b| a.predicate().cmp(b.predicate()));
    (
        negative.into_iter().map(Literal::predicate).collect(),
        positive.into_iter().map(Literal::predicate).collect(),
    )
}

/// Backtracking search for a consistent precondition-to-candidate pairing.
/// On success `order[i]` is the candidate index filling precondition `i`.
fn pair(
    preconditions: &[Literal],
    candidate: &[&Literal],
    subst: &Substitution,
    used: &mut [bool],
    order: &mut Vec<usize>,
) -> bool {
    let Some(pattern) = preconditions.get(order.len()) else {
        return true;
    };

    for (idx, literal) in candidate.iter().enumerate() {
        if used[idx] {
            continue;
        }
        if let Ok(next) = unify_with_substitution(pattern, literal, subst) {
            used[idx] = true;
            order.push(idx);
            if pair(preconditions, candidate, &next, used, order) {
                return true;
            }
            order.pop();
            used[idx] = false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{not, Object, PredicateDecl, Variable};

    struct World {
        free: PredicateDecl,
        holding: PredicateDecl,
        k: Variable,
        c: Variable,
    }

    fn world() -> World {
        World {
            free: PredicateDecl::new("free", vec![Variable::free("?k", "arm")]),
            holding: PredicateDecl::new(
                "holding",
                vec![
                    Variable::free("?k", "arm"),
                    Variable::free("?c", "container"),
                ],
            ),
            k: Variable::free("?k", "arm"),
            c: Variable::free("?c", "container"),
        }
    }

    fn arm(name: &str) -> Object {
        Object::new(name, "arm")
    }

    fn container(name: &str) -> Object {
        Object::new(name, "container")
    }

    /// free(?k) and holding(?k, ?c): same arm in both.
    fn swap(w: &World) -> ActionSchema {
        ActionSchema::new(
            "swap",
            vec![w.k.clone(), w.c.clone()],
            vec![],
            vec![
                w.free.call([&w.k]).unwrap(),
                w.holding.call([&w.k, &w.c]).unwrap(),
            ],
            vec![],
        )
    }

    #[test]
    fn shared_variable_must_bind_consistently() {
        let w = world();
        let state = vec![
            w.free.call([arm("k1")]).unwrap(),
            w.holding.call([arm("k2"), container("ca")]).unwrap(),
            w.holding.call([arm("k1"), container("cb")]).unwrap(),
        ];
        let groundings = ground_action(&swap(&w), &state);

        assert_eq!(groundings.len(), 1);
        let matched = groundings[0].matched();
        assert_eq!(matched[0], state[0]);
        assert_eq!(matched[1], state[2]);
    }

    #[test]
    fn matched_literals_follow_precondition_order() {
        let w = world();
        // holding listed before free in the state
        let state = vec![
            w.holding.call([arm("k1"), container("ca")]).unwrap(),
            w.free.call([arm("k1")]).unwrap(),
        ];
        let groundings = ground_action(&swap(&w), &state);
        assert_eq!(groundings.len(), 1);
        assert_eq!(groundings[0].matched()[0].predicate(), "free");
        assert_eq!(groundings[0].matched()[1].predicate(), "holding");
    }

    #[test]
    fn no_preconditions_yields_single_empty_grounding() {
        let w = world();
        let noop = ActionSchema::new("noop", vec![], vec![], vec![], vec![]);
        let state = vec![w.free.call([arm("k1")]).unwrap()];
        let groundings = ground_action(&noop, &state);
        assert_eq!(groundings.len(), 1);
        assert!(groundings[0].matched().is_empty());
    }

    #[test]
    fn missing_declaration_yields_nothing() {
        let w = world();
        let state = vec![
            w.free.call([arm("k1")]).unwrap(),
            w.free.call([arm("k2")]).unwrap(),
        ];
        assert!(ground_action(&swap(&w), &state).is_empty());
    }

    #[test]
    fn polarity_counts_must_match() {
        let w = world();
        let state = vec![
            not(w.free.call([arm("k1")]).unwrap()),
            w.holding.call([arm("k1"), container("ca")]).unwrap(),
        ];
        assert!(ground_action(&swap(&w), &state).is_empty());
    }

    #[test]
    fn negative_preconditions_match_explicit_negative_facts() {
        let w = world();
        let idle = ActionSchema::new(
            "idle",
            vec![w.k.clone()],
            vec![],
            vec![not(w.free.call([&w.k]).unwrap())],
            vec![],
        );
        let state = vec![
            w.free.call([arm("k1")]).unwrap(),
            not(w.free.call([arm("k2")]).unwrap()),
        ];
        let groundings = ground_action(&idle, &state);
        assert_eq!(groundings.len(), 1);
        assert_eq!(groundings[0].matched()[0], state[1]);
    }

    #[test]
    fn repeated_predicate_pairs_by_binding() {
        let w = world();
        let c2 = Variable::free("?d", "container");
        // Two holding preconditions sharing the arm
        let juggle = ActionSchema::new(
            "juggle",
            vec![w.k.clone(), w.c.clone(), c2.clone()],
            vec![],
            vec![
                w.holding.call([&w.k, &w.c]).unwrap(),
                w.holding.call([&w.k, &c2]).unwrap(),
            ],
            vec![],
        );
        let state = vec![
            w.holding.call([arm("k1"), container("ca")]).unwrap(),
            w.holding.call([arm("k2"), container("cb")]).unwrap(),
            w.holding.call([arm("k1"), container("cc")]).unwrap(),
        ];
        let groundings = ground_action(&juggle, &state);
        assert_eq!(groundings.len(), 1);
        assert_eq!(groundings[0].matched(), &[state[0].clone(), state[2].clone()]);
    }
}
