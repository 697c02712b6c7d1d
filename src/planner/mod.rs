pub mod bounds;
pub mod constants;
pub mod cuts;
pub mod enumerator;
pub mod model;
pub mod ranking;
pub mod search;

pub use bounds::{derive_bounds, BlockBounds};
pub use cuts::{exclude_assignment, CutOutcome};
pub use enumerator::{ExhaustReason, SearchOutcome, SearchState, SolutionEnumerator};
pub use model::{Constraint, DietModel, FoodVar, LinearExpr, Relation, VarDef, VarId, VarKind};
pub use ranking::rank_solutions;
pub use search::{plan_meals, PlanReport, SearchConfig};
