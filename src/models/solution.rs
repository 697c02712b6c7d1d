use serde::Serialize;

use crate::models::{FoodItem, Macro, Macros, Targets, Unit};

/// How much of one food a solution uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub food_name: String,
    pub unit: Unit,

    /// Number of blocks chosen by the solver.
    pub blocks: i64,

    /// Grams or pieces: `blocks * block_size`.
    pub amount: f64,

    pub macros: Macros,
    pub calories: f64,
}

impl Allocation {
    pub fn new(food: &FoodItem, blocks: i64) -> Self {
        let macros = food.per_block().scaled(blocks as f64);
        Self {
            food_name: food.name.clone(),
            unit: food.unit,
            blocks,
            amount: blocks as f64 * f64::from(food.block_size()),
            calories: macros.calories(),
            macros,
        }
    }
}

/// One feasible plan found by the search. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub allocations: Vec<Allocation>,

    /// Sum of the normalized deviations.
    pub objective: f64,

    pub totals: Macros,
    pub calories: f64,

    /// |delivered - target| / target for each macro.
    pub deviations: Macros,
}

impl Solution {
    pub fn new(allocations: Vec<Allocation>, targets: &Targets) -> Self {
        let mut totals = Macros::default();
        for allocation in &allocations {
            totals += allocation.macros;
        }

        let deviation = |m: Macro| (totals.get(m) - targets.get(m)).abs() * targets.weight(m);
        let deviations = Macros::new(
            deviation(Macro::Protein),
            deviation(Macro::Carbs),
            deviation(Macro::Fat),
        );
        let objective = Macro::ALL.iter().map(|&m| deviations.get(m)).sum();

        Self {
            allocations,
            objective,
            calories: totals.calories(),
            totals,
            deviations,
        }
    }

    /// Block count chosen for a food, by exact name.
    pub fn blocks_of(&self, food_name: &str) -> Option<i64> {
        self.allocations
            .iter()
            .find(|a| a.food_name == food_name)
            .map(|a| a.blocks)
    }

    pub fn signature(&self) -> SolutionSignature {
        SolutionSignature::new(
            self.allocations
                .iter()
                .map(|a| (a.food_name.clone(), a.blocks)),
        )
    }
}

/// Sorted `(food, blocks)` pairs identifying a solution during a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolutionSignature(Vec<(String, i64)>);

impl SolutionSignature {
    pub fn new(pairs: impl IntoIterator<Item = (String, i64)>) -> Self {
        let mut pairs: Vec<(String, i64)> = pairs.into_iter().collect();
        pairs.sort();
        Self(pairs)
    }

    pub fn pairs(&self) -> &[(String, i64)] {
        &self.0
    }
}
