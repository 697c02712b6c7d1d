pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod planner;
pub mod solver;
pub mod state;

pub use error::{DietError, Result};
pub use models::{FoodItem, Solution, Targets, Unit};
pub use planner::{plan_meals, PlanReport, SearchConfig};
