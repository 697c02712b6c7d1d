//! Solver-agnostic integer model of a block allocation.
//!
//! A [`DietModel`] owns every variable, row and the objective of one search
//! round. Cuts never mutate a model in place; they derive a new one (see
//! [`crate::planner::cuts`]).

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{DietError, Result};
use crate::models::{Allocation, FoodItem, Macro, Solution, Targets};
use crate::planner::bounds::{derive_bounds, BlockBounds};
use crate::planner::constants::BOUND_EPSILON;

/// Index of a variable inside its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Integer,
    Binary,
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub name: String,
    pub kind: VarKind,
    pub lower: f64,
    pub upper: Option<f64>,
}

/// Sum of `coefficient * variable` terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term(mut self, var: VarId, coeff: f64) -> Self {
        self.add(var, coeff);
        self
    }

    /// Adds a term; zero coefficients are dropped.
    pub fn add(&mut self, var: VarId, coeff: f64) {
        if coeff != 0.0 {
            self.terms.push((var, coeff));
        }
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression at a point indexed by variable id.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coeff)| coeff * values.get(var.index()).copied().unwrap_or(0.0))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Le,
    Eq,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub name: String,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

impl Constraint {
    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::Le => lhs <= self.rhs + tolerance,
            Relation::Eq => (lhs - self.rhs).abs() <= tolerance,
            Relation::Ge => lhs >= self.rhs - tolerance,
        }
    }
}

/// A selected food and the integer variable counting its blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodVar {
    pub food: FoodItem,
    pub var: VarId,
    pub bounds: BlockBounds,

    /// Largest count the calorie equality allows with every other food at
    /// its lower bound, capped by `bounds.upper`. `None` for zero-calorie
    /// foods without a Max.
    pub ceiling: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DietModel {
    variables: Vec<VarDef>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
    foods: Vec<FoodVar>,
    deviations: [VarId; 3],
    targets: Targets,
    cut_count: usize,
}

impl DietModel {
    /// Build the base model for a food selection.
    ///
    /// One integer block variable per food, one continuous deviation per
    /// macro, the exact-calorie row, two rows per macro linearizing
    /// `|delivered - target|`, and the `sum(deviation / target)` objective.
    pub fn build(foods: &[FoodItem], targets: &Targets) -> Result<Self> {
        if foods.is_empty() {
            return Err(DietError::NoFoodsSelected);
        }

        let mut seen = HashSet::new();
        for food in foods {
            food.validate_fields()?;
            if !seen.insert(food.key()) {
                return Err(DietError::Config(format!(
                    "food '{}' is selected more than once",
                    food.name
                )));
            }
        }

        let bounds = foods
            .iter()
            .map(derive_bounds)
            .collect::<Result<Vec<_>>>()?;

        let mut model = Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: LinearExpr::new(),
            foods: Vec::with_capacity(foods.len()),
            deviations: [VarId(0); 3],
            targets: *targets,
            cut_count: 0,
        };

        let ceilings = calorie_ceilings(foods, &bounds, targets.calories());
        for ((food, bounds), ceiling) in foods.iter().zip(bounds).zip(ceilings) {
            let var = model.add_var(VarDef {
                name: format!("blocks_{}", food.name),
                kind: VarKind::Integer,
                lower: bounds.lower as f64,
                upper: bounds.upper.map(|u| u as f64),
            });
            model.foods.push(FoodVar {
                food: food.clone(),
                var,
                bounds,
                ceiling,
            });
        }

        for (slot, m) in Macro::ALL.into_iter().enumerate() {
            let deviation = model.add_var(VarDef {
                name: format!("deviation_{}", m.label()),
                kind: VarKind::Continuous,
                lower: 0.0,
                upper: None,
            });
            model.deviations[slot] = deviation;

            let delivered = model.delivered(|food| food.per_block().get(m));
            let target = targets.get(m);

            // delivered - target <= deviation
            let mut over = delivered.clone();
            over.add(deviation, -1.0);
            model.add_constraint(format!("{}_over", m.label()), over, Relation::Le, target);

            // target - delivered <= deviation
            let mut under = delivered;
            under.add(deviation, 1.0);
            model.add_constraint(format!("{}_under", m.label()), under, Relation::Ge, target);

            model.objective.add(deviation, targets.weight(m));
        }

        let calories = model.delivered(FoodItem::calories_per_block);
        model.add_constraint("calories".to_string(), calories, Relation::Eq, targets.calories());

        debug!(
            foods = model.foods.len(),
            variables = model.variables.len(),
            constraints = model.constraints.len(),
            target_calories = targets.calories(),
            "built diet model"
        );

        Ok(model)
    }

    /// `sum(per_block(food) * blocks)` over the selected foods.
    fn delivered(&self, per_block: impl Fn(&FoodItem) -> f64) -> LinearExpr {
        let mut expr = LinearExpr::new();
        for food_var in &self.foods {
            expr.add(food_var.var, per_block(&food_var.food));
        }
        expr
    }

    pub(crate) fn add_var(&mut self, def: VarDef) -> VarId {
        self.variables.push(def);
        VarId(self.variables.len() - 1)
    }

    pub(crate) fn add_constraint(
        &mut self,
        name: String,
        expr: LinearExpr,
        relation: Relation,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name,
            expr,
            relation,
            rhs,
        });
    }

    pub(crate) fn record_cut(&mut self) {
        self.cut_count += 1;
    }

    pub fn variables(&self) -> &[VarDef] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn foods(&self) -> &[FoodVar] {
        &self.foods
    }

    pub fn deviation_var(&self, m: Macro) -> VarId {
        match m {
            Macro::Protein => self.deviations[0],
            Macro::Carbs => self.deviations[1],
            Macro::Fat => self.deviations[2],
        }
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Number of no-good cuts this model carries.
    pub fn cut_count(&self) -> usize {
        self.cut_count
    }

    /// Block counts of the selected foods at a solver point, rounded to
    /// integers.
    pub fn block_counts(&self, values: &[f64], tolerance: f64) -> Result<Vec<i64>> {
        if values.len() != self.variables.len() {
            return Err(DietError::Solver(format!(
                "solver returned {} values for {} variables",
                values.len(),
                self.variables.len()
            )));
        }

        Ok(self
            .foods
            .iter()
            .map(|food_var| {
                let raw = values[food_var.var.index()];
                let rounded = raw.round();
                if (raw - rounded).abs() > tolerance {
                    warn!(
                        food = %food_var.food.name,
                        value = raw,
                        "solver value is not integral, rounding"
                    );
                }
                rounded as i64
            })
            .collect())
    }

    /// Materialize a solution from block counts aligned with [`Self::foods`].
    pub fn solution(&self, counts: &[i64]) -> Solution {
        let allocations = self
            .foods
            .iter()
            .zip(counts)
            .map(|(food_var, &blocks)| Allocation::new(&food_var.food, blocks))
            .collect();
        Solution::new(allocations, &self.targets)
    }
}

/// Upper count each food can reach under the exact-calorie row while every
/// other food sits at its lower bound.
fn calorie_ceilings(foods: &[FoodItem], bounds: &[BlockBounds], target_calories: f64) -> Vec<Option<i64>> {
    let floor_calories: f64 = foods
        .iter()
        .zip(bounds)
        .map(|(food, b)| food.calories_per_block() * b.lower as f64)
        .sum();

    foods
        .iter()
        .zip(bounds)
        .map(|(food, b)| {
            let per_block = food.calories_per_block();
            let implied = if per_block > 0.0 {
                let others = floor_calories - per_block * b.lower as f64;
                let blocks = ((target_calories - others) / per_block + BOUND_EPSILON).floor() as i64;
                Some(blocks.max(b.lower))
            } else {
                None
            };
            match (b.upper, implied) {
                (Some(upper), Some(implied)) => Some(upper.min(implied)),
                (upper, implied) => upper.or(implied),
            }
        })
        .collect()
}
