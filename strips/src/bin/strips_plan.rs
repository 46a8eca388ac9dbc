// STRIPS planner binary
// Solves the crane world with breadth-first search and prints or writes the plan

use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use strips::{
    BreadthFirstSearch, CraneGoal, CraneWorld, PlanFormat, PlanNode, SearchConfig, SearchOutcome,
};

#[derive(Parser)]
#[command(name = "strips-plan")]
#[command(about = "Breadth-first STRIPS planner for the crane world")]
#[command(version = "0.1.0")]
struct Args {
    /// Goal preset
    #[arg(long, value_enum, default_value_t = CraneGoal::TopOfP2)]
    goal: CraneGoal,

    /// Search configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the PDDL domain to this file
    #[arg(long, value_name = "FILE")]
    domain_out: Option<PathBuf>,

    /// Write the PDDL problem to this file
    #[arg(long, value_name = "FILE")]
    problem_out: Option<PathBuf>,

    /// Write the plan to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    plan_out: Option<PathBuf>,

    /// Plan output format
    #[arg(long, value_enum, default_value_t = PlanFormat::Text)]
    format: PlanFormat,

    /// Print the groundings applicable in the initial state and exit
    #[arg(long)]
    list_actions: bool,

    /// Stop expanding nodes at this level
    #[arg(long)]
    max_level: Option<usize>,

    /// Stop after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,
}

impl Args {
    fn search_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_file(path)
                .with_context(|| format!("loading search config {}", path.display()))?,
            None => SearchConfig::default(),
        }
        .with_env_overrides()?;

        if let Some(level) = self.max_level {
            config = config.with_max_level(level);
        }
        if let Some(expansions) = self.max_expansions {
            config = config.with_max_expansions(expansions);
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("strips=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let world = CraneWorld::new()?;
    let problem = world.problem(args.goal)?;

    if let Some(path) = &args.domain_out {
        fs::write(path, problem.domain().to_string())
            .with_context(|| format!("writing domain to {}", path.display()))?;
        info!(path = %path.display(), "wrote domain");
    }
    if let Some(path) = &args.problem_out {
        fs::write(path, problem.to_string())
            .with_context(|| format!("writing problem to {}", path.display()))?;
        info!(path = %path.display(), "wrote problem");
    }

    if args.list_actions {
        let root = PlanNode::root(&problem);
        for (action, groundings) in root.applicable_actions() {
            println!("{} ({} groundings)", action.name(), groundings.len());
            for grounding in groundings {
                let literals: Vec<String> =
                    grounding.matched().iter().map(ToString::to_string).collect();
                println!("  {}", literals.join(" "));
            }
        }
        return Ok(());
    }

    let search = BreadthFirstSearch::from_problem(&problem).with_config(args.search_config()?);
    info!(goal = ?args.goal, config = ?search.config(), "starting search");
    let started = Instant::now();
    let report = search.run()?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        expanded = report.stats.expanded,
        generated = report.stats.generated,
        "search done"
    );

    match &report.outcome {
        SearchOutcome::Found(node) => {
            let plan = node.plan();
            match &args.plan_out {
                Some(path) => plan
                    .write_to(path, args.format)
                    .with_context(|| format!("writing plan to {}", path.display()))?,
                None => println!("{}", plan.render(args.format)?),
            }
        }
        SearchOutcome::NoPlan => {
            println!("No plan exists for goal {:?}", args.goal);
            std::process::exit(1);
        }
        SearchOutcome::LimitReached => {
            println!(
                "Search limit reached after {} expansions (deepest level {})",
                report.stats.expanded, report.stats.deepest_level
            );
            std::process::exit(2);
        }
    }

    Ok(())
}
