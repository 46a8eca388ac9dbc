use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::StripsResult;
use crate::model::Literal;

/// One applied action with the state literals it consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    pub action: String,
    pub matched: Vec<Literal>,
}

/// Sequence of actions from the initial state to the goal, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    steps: Vec<PlanStep>,
}

/// Output format for [`Plan::write_to`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanFormat {
    Text,
    Json,
}

impl Plan {
    pub fn new(steps: Vec<PlanStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn action_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.action.as_str()).collect()
    }

    pub fn render(&self, format: PlanFormat) -> StripsResult<String> {
        match format {
            PlanFormat::Text => Ok(self.to_string()),
            PlanFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    pub fn write_to(&self, path: impl AsRef<Path>, format: PlanFormat) -> StripsResult<()> {
        let path = path.as_ref();
        fs::write(path, self.render(format)?)?;
        info!(path = %path.display(), steps = self.len(), "wrote plan");
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Actions to take, starting from the top:")?;
        for step in &self.steps {
            let literals: Vec<String> = step.matched.iter().map(|l| format!("'{}'", l)).collect();
            write!(f, "\n\n{}: [{}]", step.action, literals.join(", "))?;
        }
        Ok(())
    }
}
