//! Planner core: grounding, state transition, search nodes and the
//! breadth-first driver.

pub mod bfs;
pub mod grounding;
pub mod node;
pub mod plan;
pub mod transition;
pub mod unification;

pub use bfs::{BreadthFirstSearch, SearchOutcome, SearchReport, SearchStats};
pub use grounding::{ground_action, Grounding};
pub use node::{ActionTaken, PlanNode};
pub use plan::{Plan, PlanFormat, PlanStep};
pub use transition::apply_action;
pub use unification::{Substitution, UnificationError};
