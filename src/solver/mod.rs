//! Integer-program solving behind a narrow trait.
//!
//! The planner only needs to know whether a round produced an optimal point
//! or not; [`IpSolver`] keeps the backend swappable and lets tests script
//! outcomes.

mod lp_backend;

pub use lp_backend::MicroLpSolver;

use crate::planner::DietModel;

/// Result of one solve call.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// `values` is indexed by variable id.
    Optimal { values: Vec<f64>, objective: f64 },
    Infeasible,
    Unbounded,
    /// Backend failure, message kept verbatim.
    Error(String),
}

impl SolveOutcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal { .. })
    }
}

pub trait IpSolver {
    fn solve(&self, model: &DietModel) -> SolveOutcome;
}

impl<S: IpSolver + ?Sized> IpSolver for &S {
    fn solve(&self, model: &DietModel) -> SolveOutcome {
        (**self).solve(model)
    }
}
