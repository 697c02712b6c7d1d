use std::time::{Duration, Instant};

use tracing::info;

use crate::error::{DietError, Result};
use crate::models::{FoodItem, Solution, Targets};
use crate::planner::constants::{
    DEFAULT_BIG_M_FALLBACK, DEFAULT_INTEGRALITY_TOLERANCE, DEFAULT_MAX_SOLUTIONS,
};
use crate::planner::enumerator::{ExhaustReason, SearchState, SolutionEnumerator};
use crate::planner::model::DietModel;
use crate::planner::ranking::rank_solutions;
use crate::solver::IpSolver;

/// Immutable settings for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Stop after this many distinct plans.
    pub max_solutions: usize,

    /// Big-M for cuts on foods with no Max and no calories.
    pub big_m_fallback: f64,

    pub integrality_tolerance: f64,

    /// Wall-clock budget checked before each solve.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            big_m_fallback: DEFAULT_BIG_M_FALLBACK,
            integrality_tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_solutions == 0 {
            return Err(DietError::Config(
                "max solutions must be at least 1".to_string(),
            ));
        }
        if !self.big_m_fallback.is_finite() || self.big_m_fallback < 1.0 {
            return Err(DietError::Config(format!(
                "big-M fallback must be a finite number >= 1, got {}",
                self.big_m_fallback
            )));
        }
        if !self.integrality_tolerance.is_finite()
            || self.integrality_tolerance < 0.0
            || self.integrality_tolerance >= 0.5
        {
            return Err(DietError::Config(format!(
                "integrality tolerance must be in [0, 0.5), got {}",
                self.integrality_tolerance
            )));
        }
        Ok(())
    }
}

/// Ranked output of a completed search.
#[derive(Debug, Clone)]
pub struct PlanReport {
    /// Best first; ties keep discovery order.
    pub solutions: Vec<Solution>,
    pub state: SearchState,
    pub targets: Targets,
}

impl PlanReport {
    pub fn target_calories(&self) -> f64 {
        self.targets.calories()
    }

    /// No plan hits the exact calories with the requested foods.
    pub fn is_infeasible(&self) -> bool {
        self.solutions.is_empty() && self.state == SearchState::Exhausted(ExhaustReason::Infeasible)
    }

    pub fn best(&self) -> Option<&Solution> {
        self.solutions.first()
    }
}

/// Validate inputs, build the model, enumerate distinct plans and rank them.
///
/// Infeasibility and exhaustion are reported through [`PlanReport::state`];
/// only configuration, model and solver failures are errors.
pub fn plan_meals<S: IpSolver + ?Sized>(
    foods: &[FoodItem],
    targets: &Targets,
    config: &SearchConfig,
    solver: &S,
) -> Result<PlanReport> {
    config.validate()?;
    let model = DietModel::build(foods, targets)?;

    info!(
        foods = foods.len(),
        max_solutions = config.max_solutions,
        target_calories = targets.calories(),
        "starting plan search"
    );

    let enumerator = SolutionEnumerator::new(model, solver, config);
    let outcome = match config.time_limit {
        Some(limit) => {
            let deadline = Instant::now() + limit;
            enumerator
                .with_stop_predicate(move |_| Instant::now() >= deadline)
                .run()
        }
        None => enumerator.run(),
    };

    if let SearchState::Failed(reason) = &outcome.state {
        return Err(DietError::Solver(reason.clone()));
    }

    Ok(PlanReport {
        solutions: rank_solutions(&outcome.solutions),
        state: outcome.state,
        targets: *targets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let zero = SearchConfig {
            max_solutions: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(DietError::Config(_))));

        let bad_m = SearchConfig {
            big_m_fallback: f64::INFINITY,
            ..Default::default()
        };
        assert!(bad_m.validate().is_err());

        let bad_tol = SearchConfig {
            integrality_tolerance: 0.5,
            ..Default::default()
        };
        assert!(bad_tol.validate().is_err());
    }
}
