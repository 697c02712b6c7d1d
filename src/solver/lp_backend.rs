use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable, VariableDefinition,
};
use tracing::debug;

use crate::planner::{DietModel, LinearExpr, Relation, VarDef, VarKind};
use crate::solver::{IpSolver, SolveOutcome};

/// Pure-Rust branch and bound through `good_lp`'s microlp backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl IpSolver for MicroLpSolver {
    fn solve(&self, model: &DietModel) -> SolveOutcome {
        let mut problem = ProblemVariables::new();
        let vars: Vec<Variable> = model
            .variables()
            .iter()
            .map(|def| problem.add(definition(def)))
            .collect();

        let objective = expression(model.objective(), &vars, 1.0);
        let mut lp = problem.minimise(objective).using(microlp);

        for row in model.constraints() {
            let built = match row.relation {
                Relation::Le => constraint::leq(expression(&row.expr, &vars, 1.0), row.rhs),
                Relation::Eq => constraint::eq(expression(&row.expr, &vars, 1.0), row.rhs),
                // a >= b  <=>  -a <= -b
                Relation::Ge => constraint::leq(expression(&row.expr, &vars, -1.0), -row.rhs),
            };
            lp = lp.with(built);
        }

        match lp.solve() {
            Ok(solution) => {
                let values: Vec<f64> = vars.iter().map(|&v| solution.value(v)).collect();
                let objective = model.objective().evaluate(&values);
                debug!(objective, "microlp found optimum");
                SolveOutcome::Optimal { values, objective }
            }
            Err(ResolutionError::Infeasible) => SolveOutcome::Infeasible,
            Err(ResolutionError::Unbounded) => SolveOutcome::Unbounded,
            Err(e) => SolveOutcome::Error(e.to_string()),
        }
    }
}

fn definition(def: &VarDef) -> VariableDefinition {
    let mut var = variable().name(def.name.clone());
    var = match def.kind {
        VarKind::Integer => var.integer(),
        VarKind::Binary => var.binary(),
        VarKind::Continuous => var,
    };
    var = var.min(def.lower);
    if let Some(upper) = def.upper {
        var = var.max(upper);
    }
    var
}

fn expression(expr: &LinearExpr, vars: &[Variable], sign: f64) -> Expression {
    let mut out = Expression::default();
    for &(var, coeff) in expr.terms() {
        out += vars[var.index()] * (sign * coeff);
    }
    out
}
