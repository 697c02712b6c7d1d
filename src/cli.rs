use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::planner::constants::{DEFAULT_BIG_M_FALLBACK, DEFAULT_INTEGRALITY_TOLERANCE, DEFAULT_MAX_SOLUTIONS};
use crate::planner::SearchConfig;

/// Macro Blocks: split foods into 10 g / 1 piece blocks that hit your
/// calories exactly and your macros as closely as possible.
#[derive(Parser, Debug)]
#[command(name = "macro-blocks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the food catalog JSON file.
    #[arg(short, long, default_value = "Alimentos.json")]
    pub catalog: PathBuf,

    /// Path to the macro targets JSON file.
    #[arg(short, long, default_value = "Macros.json")]
    pub targets: PathBuf,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the best block allocations for a food selection.
    Plan(PlanArgs),

    /// List the catalog with block sizes and per-block macros.
    Foods,
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan(PlanArgs::default())
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Food to include (repeatable). Prompts for a selection when omitted.
    #[arg(short, long = "food")]
    pub foods: Vec<String>,

    /// Number of distinct plans to look for.
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_SOLUTIONS)]
    pub max_solutions: usize,

    /// Big-M for cuts on foods with no Max and no calories.
    #[arg(long, default_value_t = DEFAULT_BIG_M_FALLBACK)]
    pub big_m: f64,

    /// Stop looking for more plans after this many seconds.
    #[arg(long)]
    pub time_limit: Option<u64>,

    /// Also write the ranked plans to a CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Also write the ranked plans to a JSON file.
    #[arg(long)]
    pub json: Option<PathBuf>,
}

impl Default for PlanArgs {
    fn default() -> Self {
        Self {
            foods: Vec::new(),
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            big_m: DEFAULT_BIG_M_FALLBACK,
            time_limit: None,
            csv: None,
            json: None,
        }
    }
}

impl PlanArgs {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            max_solutions: self.max_solutions,
            big_m_fallback: self.big_m,
            integrality_tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
            time_limit: self.time_limit.map(Duration::from_secs),
        }
    }
}
