//! STRIPS - typed classical planning
//!
//! Describe a world with typed objects, predicate declarations and action
//! schemas, state a problem as initial and goal literals, and let
//! [`BreadthFirstSearch`] find the shortest sequence of ground actions.
//!
//! ```no_run
//! use strips::{BreadthFirstSearch, CraneGoal, CraneWorld};
//!
//! let world = CraneWorld::new()?;
//! let problem = world.problem(CraneGoal::TopOfP2)?;
//! let report = BreadthFirstSearch::from_problem(&problem).run()?;
//! if let Some(plan) = report.plan() {
//!     println!("{}", plan);
//! }
//! # Ok::<(), strips::StripsError>(())
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod pddl;
pub mod planner;
pub mod worlds;

pub use config::SearchConfig;
pub use error::{StripsError, StripsResult};
pub use model::{
    not, ActionSchema, Arg, Domain, Fact, Literal, Object, PredicateDecl, Problem, TypeName,
    Variable,
};
pub use planner::{
    BreadthFirstSearch, Grounding, Plan, PlanFormat, PlanNode, PlanStep, SearchOutcome,
    SearchReport, SearchStats,
};
pub use worlds::{CraneGoal, CraneWorld};
