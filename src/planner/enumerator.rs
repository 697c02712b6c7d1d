use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::DietError;
use crate::models::{Solution, SolutionSignature};
use crate::planner::constants::CALORIE_TOLERANCE;
use crate::planner::cuts::{exclude_assignment, CutOutcome};
use crate::planner::model::DietModel;
use crate::planner::search::SearchConfig;
use crate::solver::{IpSolver, SolveOutcome};

/// Why a search ran out of solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustReason {
    Infeasible,
    Unbounded,
    /// The solver returned an assignment that was already recorded.
    Duplicate,
    /// The last cut left no food free to change.
    DomainExhausted,
}

/// Enumerator lifecycle. Everything except `Active` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Active,
    Exhausted(ExhaustReason),
    MaxReached,
    /// The early-stop predicate fired before a solve.
    Interrupted,
    Failed(String),
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SearchState::Active)
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchState::Active => write!(f, "active"),
            SearchState::Exhausted(ExhaustReason::Infeasible) => write!(f, "exhausted (infeasible)"),
            SearchState::Exhausted(ExhaustReason::Unbounded) => write!(f, "exhausted (unbounded)"),
            SearchState::Exhausted(ExhaustReason::Duplicate) => write!(f, "exhausted (repeated plan)"),
            SearchState::Exhausted(ExhaustReason::DomainExhausted) => {
                write!(f, "exhausted (no alternatives left)")
            }
            SearchState::MaxReached => write!(f, "max solutions reached"),
            SearchState::Interrupted => write!(f, "interrupted"),
            SearchState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Distinct solutions in discovery order plus the terminal state.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub solutions: Vec<Solution>,
    pub state: SearchState,
}

type StopPredicate<'a> = Box<dyn FnMut(usize) -> bool + 'a>;

/// Drives solve -> record -> cut over one evolving model.
pub struct SolutionEnumerator<'a, S: IpSolver + ?Sized> {
    solver: &'a S,
    config: &'a SearchConfig,
    model: DietModel,
    state: SearchState,
    solutions: Vec<Solution>,
    seen: HashSet<SolutionSignature>,
    stop: Option<StopPredicate<'a>>,
}

impl<'a, S: IpSolver + ?Sized> SolutionEnumerator<'a, S> {
    pub fn new(model: DietModel, solver: &'a S, config: &'a SearchConfig) -> Self {
        Self {
            solver,
            config,
            model,
            state: SearchState::Active,
            solutions: Vec::new(),
            seen: HashSet::new(),
            stop: None,
        }
    }

    /// Predicate checked before every solve with the number of solutions
    /// recorded so far; returning true ends the search as `Interrupted`.
    pub fn with_stop_predicate(mut self, stop: impl FnMut(usize) -> bool + 'a) -> Self {
        self.stop = Some(Box::new(stop));
        self
    }

    /// The model the next round will solve.
    pub fn model(&self) -> &DietModel {
        &self.model
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Run one round. Returns the state after it; terminal states are sticky.
    pub fn step(&mut self) -> &SearchState {
        if self.state.is_terminal() {
            return &self.state;
        }

        if let Some(stop) = self.stop.as_mut() {
            if stop(self.solutions.len()) {
                return self.finish(SearchState::Interrupted);
            }
        }

        let round = self.model.cut_count() + 1;
        debug!(round, constraints = self.model.constraints().len(), "solving");

        let values = match self.solver.solve(&self.model) {
            SolveOutcome::Optimal { values, .. } => values,
            SolveOutcome::Infeasible => {
                return self.finish(SearchState::Exhausted(ExhaustReason::Infeasible));
            }
            SolveOutcome::Unbounded => {
                return self.finish(SearchState::Exhausted(ExhaustReason::Unbounded));
            }
            SolveOutcome::Error(reason) => return self.finish(SearchState::Failed(reason)),
        };

        let counts = match self
            .model
            .block_counts(&values, self.config.integrality_tolerance)
        {
            Ok(counts) => counts,
            Err(DietError::Solver(reason)) => return self.finish(SearchState::Failed(reason)),
            Err(e) => return self.finish(SearchState::Failed(e.to_string())),
        };

        let solution = self.model.solution(&counts);
        let target_calories = self.model.targets().calories();
        if (solution.calories - target_calories).abs() > CALORIE_TOLERANCE {
            warn!(
                round,
                calories = solution.calories,
                target_calories,
                "rounded plan misses the calorie target"
            );
        }
        let signature = solution.signature();
        if !self.seen.insert(signature) {
            return self.finish(SearchState::Exhausted(ExhaustReason::Duplicate));
        }

        info!(
            round,
            objective = solution.objective,
            calories = solution.calories,
            "recorded plan"
        );
        self.solutions.push(solution);

        if self.solutions.len() >= self.config.max_solutions {
            return self.finish(SearchState::MaxReached);
        }

        match exclude_assignment(&self.model, &counts, self.config.big_m_fallback) {
            CutOutcome::Cut(next) => self.model = next,
            CutOutcome::DomainExhausted => {
                return self.finish(SearchState::Exhausted(ExhaustReason::DomainExhausted));
            }
        }

        &self.state
    }

    /// Step until a terminal state.
    pub fn run(mut self) -> SearchOutcome {
        while !self.step().is_terminal() {}
        SearchOutcome {
            solutions: self.solutions,
            state: self.state,
        }
    }

    fn finish(&mut self, state: SearchState) -> &SearchState {
        info!(solutions = self.solutions.len(), state = %state, "search finished");
        self.state = state;
        &self.state
    }
}
