//! Breadth-first search over plan nodes.
//!
//! Tree search: every application produces a fresh node, so a state reached by
//! two different action orders is expanded twice. There is no visited set.

use serde::Serialize;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, info};

use super::node::PlanNode;
use super::plan::Plan;
use super::transition::apply_action;
use crate::config::SearchConfig;
use crate::error::StripsResult;
use crate::model::Problem;

/// How a search ended
#[derive(Debug)]
pub enum SearchOutcome {
    /// First dequeued node whose state satisfies the goal
    Found(Rc<PlanNode>),
    /// The frontier emptied without reaching the goal
    NoPlan,
    /// A configured limit stopped the search before the frontier emptied
    LimitReached,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Nodes whose successors were generated
    pub expanded: usize,
    /// Child nodes created
    pub generated: usize,
    /// Deepest level dequeued
    pub deepest_level: usize,
}

#[derive(Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn goal_node(&self) -> Option<&Rc<PlanNode>> {
        match &self.outcome {
            SearchOutcome::Found(node) => Some(node),
            _ => None,
        }
    }

    pub fn plan(&self) -> Option<Plan> {
        self.goal_node().map(|node| node.plan())
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }
}

/// FIFO search from a root node
pub struct BreadthFirstSearch {
    root: PlanNode,
    config: SearchConfig,
}

impl BreadthFirstSearch {
    pub fn new(root: PlanNode) -> Self {
        Self {
            root,
            config: SearchConfig::default(),
        }
    }

    pub fn from_problem(problem: &Problem) -> Self {
        Self::new(PlanNode::root(problem))
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search. Errors only come from malformed action schemas.
    pub fn run(self) -> StripsResult<SearchReport> {
        let Self { mut root, config } = self;
        root.mark_explored();

        let mut frontier = VecDeque::new();
        frontier.push_back(Rc::new(root));
        let mut stats = SearchStats::default();
        let mut previous_level = None;
        let mut limited = false;

        while let Some(node) = frontier.pop_front() {
            let level = node.level();
            if previous_level != Some(level) {
                if config.log_progress {
                    info!(level, frontier = frontier.len() + 1, "exploration level");
                }
                previous_level = Some(level);
            }
            stats.deepest_level = stats.deepest_level.max(level);

            if node.is_goal() {
                info!(
                    level,
                    expanded = stats.expanded,
                    generated = stats.generated,
                    "goal reached"
                );
                return Ok(SearchReport {
                    outcome: SearchOutcome::Found(node),
                    stats,
                });
            }

            if config.max_level.is_some_and(|max| level >= max) {
                // A dead end at the cap hides nothing.
                if node
                    .applicable_actions()
                    .iter()
                    .any(|(_, groundings)| !groundings.is_empty())
                {
                    limited = true;
                }
                continue;
            }
            if config
                .max_expansions
                .is_some_and(|max| stats.expanded >= max)
            {
                limited = true;
                break;
            }

            stats.expanded += 1;
            for (action, groundings) in node.applicable_actions() {
                for grounding in groundings {
                    let mut child = apply_action(&node, &action, grounding)?;
                    stats.generated += 1;
                    if !child.is_explored() {
                        child.mark_explored();
                        frontier.push_back(Rc::new(child));
                    }
                }
            }
            debug!(level, frontier = frontier.len(), "expanded node");
        }

        let outcome = if limited {
            SearchOutcome::LimitReached
        } else {
            SearchOutcome::NoPlan
        };
        info!(
            ?outcome,
            expanded = stats.expanded,
            generated = stats.generated,
            "search finished without reaching the goal"
        );
        Ok(SearchReport { outcome, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{not, ActionSchema, Domain, Object, PredicateDecl, TypeName, Variable};
    use std::sync::Arc;

    /// A token moves along a one-way line a -> b -> c.
    fn line_problem(goal_at: &str) -> Problem {
        let at = PredicateDecl::new("at", vec![Variable::free("?x", "place")]);
        let link = PredicateDecl::new(
            "link",
            vec![Variable::free("?x", "place"), Variable::free("?y", "place")],
        );
        let from = Variable::free("?from", "place");
        let to = Variable::free("?to", "place");
        let step = ActionSchema::new(
            "step",
            vec![from.clone(), to.clone()],
            vec![],
            vec![at.call([&from]).unwrap(), link.call([&from, &to]).unwrap()],
            vec![
                at.call([&to]).unwrap(),
                link.call([&from, &to]).unwrap(),
                not(at.call([&from]).unwrap()),
            ],
        );
        let domain = Arc::new(Domain::new(
            "line",
            [TypeName::new("place")],
            vec![at.clone(), link.clone()],
            vec![step],
        ));
        let places: Vec<Object> = ["a", "b", "c", "z"]
            .iter()
            .map(|p| Object::new(*p, "place"))
            .collect();
        Problem::new(
            "walk",
            domain,
            places.clone(),
            vec![
                at.call([&places[0]]).unwrap(),
                link.call([&places[0], &places[1]]).unwrap(),
                link.call([&places[1], &places[2]]).unwrap(),
            ],
            vec![at
                .call([&Object::new(goal_at, "place")])
                .unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn finds_shortest_plan() {
        let report = BreadthFirstSearch::from_problem(&line_problem("c"))
            .run()
            .unwrap();
        let plan = report.plan().unwrap();
        assert_eq!(plan.action_names(), vec!["step", "step"]);
        assert_eq!(report.goal_node().unwrap().level(), 2);
    }

    #[test]
    fn goal_already_satisfied_needs_no_action() {
        let report = BreadthFirstSearch::from_problem(&line_problem("a"))
            .run()
            .unwrap();
        assert!(report.plan().unwrap().is_empty());
        assert_eq!(report.stats.expanded, 0);
    }

    #[test]
    fn unreachable_goal_reports_no_plan() {
        let report = BreadthFirstSearch::from_problem(&line_problem("z"))
            .run()
            .unwrap();
        assert!(matches!(report.outcome, SearchOutcome::NoPlan));
        assert!(report.plan().is_none());
        assert_eq!(report.stats.expanded, 3);
    }

    #[test]
    fn level_limit_stops_search() {
        let search = BreadthFirstSearch::from_problem(&line_problem("c"))
            .with_config(SearchConfig::default().with_max_level(1));
        assert_eq!(search.config().max_level, Some(1));
        let report = search.run().unwrap();
        assert!(matches!(report.outcome, SearchOutcome::LimitReached));
    }

    #[test]
    fn dead_end_at_level_limit_is_no_plan() {
        // c has no outgoing link, so the cap at level 2 cuts nothing off.
        let report = BreadthFirstSearch::from_problem(&line_problem("z"))
            .with_config(SearchConfig::default().with_max_level(2))
            .run()
            .unwrap();
        assert!(matches!(report.outcome, SearchOutcome::NoPlan));
        assert_eq!(report.stats.expanded, 2);
        assert_eq!(report.stats.deepest_level, 2);

        let report = BreadthFirstSearch::from_problem(&line_problem("z"))
            .with_config(SearchConfig::default().with_max_level(1))
            .run()
            .unwrap();
        assert!(matches!(report.outcome, SearchOutcome::LimitReached));
    }

    #[test]
    fn expansion_limit_stops_search() {
        let report = BreadthFirstSearch::from_problem(&line_problem("z"))
            .with_config(SearchConfig::default().with_max_expansions(1))
            .run()
            .unwrap();
        assert!(matches!(report.outcome, SearchOutcome::LimitReached));
        assert_eq!(report.stats.expanded, 1);
    }
}
