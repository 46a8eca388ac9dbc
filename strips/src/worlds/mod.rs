//! Ready-made planning worlds.

pub mod crane;

pub use crane::{CraneGoal, CraneWorld};
