use std::cell::Cell;
use std::collections::HashSet;

use assert_float_eq::assert_float_absolute_eq;

use macro_blocks_rs::error::DietError;
use macro_blocks_rs::logging;
use macro_blocks_rs::models::{FoodItem, Targets, Unit};
use macro_blocks_rs::planner::{
    derive_bounds, plan_meals, DietModel, SearchConfig, SearchState,
};
use macro_blocks_rs::solver::{IpSolver, MicroLpSolver, SolveOutcome};

/// Counts solve calls made through the real backend.
#[derive(Default)]
struct CountingSolver {
    calls: Cell<usize>,
}

impl IpSolver for CountingSolver {
    fn solve(&self, model: &DietModel) -> SolveOutcome {
        self.calls.set(self.calls.get() + 1);
        MicroLpSolver.solve(model)
    }
}

/// 8 kcal (2 g protein), 8 kcal (2 g carbs) and 9 kcal (1 g fat) per block.
fn foods() -> Vec<FoodItem> {
    vec![
        FoodItem::new("Chicken", Unit::Grams, 100.0, 20.0, 0.0, 0.0),
        FoodItem::new("Rice", Unit::Grams, 100.0, 0.0, 20.0, 0.0),
        FoodItem::new("Oil", Unit::Grams, 100.0, 0.0, 0.0, 10.0),
    ]
}

/// 250 kcal.
fn targets() -> Targets {
    Targets::new(20.0, 20.0, 10.0).unwrap()
}

fn config(max_solutions: usize) -> SearchConfig {
    SearchConfig {
        max_solutions,
        ..Default::default()
    }
}

#[test]
fn test_finds_exact_plan() {
    logging::init_test();

    let report = plan_meals(&foods(), &targets(), &config(1), &MicroLpSolver).unwrap();

    assert_eq!(report.state, SearchState::MaxReached);
    let best = report.best().unwrap();
    assert_eq!(best.blocks_of("Chicken"), Some(10));
    assert_eq!(best.blocks_of("Rice"), Some(10));
    assert_eq!(best.blocks_of("Oil"), Some(10));
    assert_float_absolute_eq!(best.objective, 0.0, 1e-6);
    assert_float_absolute_eq!(best.calories, 250.0, 1e-6);
    assert_float_absolute_eq!(best.allocations[0].amount, 100.0, 1e-9);
}

#[test]
fn test_enumerates_distinct_near_optimal_plans() {
    logging::init_test();

    let report = plan_meals(&foods(), &targets(), &config(3), &MicroLpSolver).unwrap();

    assert_eq!(report.state, SearchState::MaxReached);
    assert_eq!(report.solutions.len(), 3);

    // Moving one block of protein into carbs costs 0.1 + 0.1.
    let objectives: Vec<f64> = report.solutions.iter().map(|s| s.objective).collect();
    assert_float_absolute_eq!(objectives[0], 0.0, 1e-6);
    assert_float_absolute_eq!(objectives[1], 0.2, 1e-6);
    assert_float_absolute_eq!(objectives[2], 0.2, 1e-6);

    let signatures: HashSet<_> = report.solutions.iter().map(|s| s.signature()).collect();
    assert_eq!(signatures.len(), 3);

    for solution in &report.solutions {
        assert_float_absolute_eq!(solution.calories, report.target_calories(), 1e-4);
        assert_eq!(solution.blocks_of("Oil"), Some(10));
    }
}

#[test]
fn test_exhausts_when_fewer_plans_exist() {
    logging::init_test();

    // Chicken 10..11 blocks, Rice 9..10, Oil fixed at 10: only
    // (10, 10) and (11, 9) reach 250 kcal.
    let selection = vec![
        foods()[0].clone().with_limits(Some(100.0), Some(110.0)),
        foods()[1].clone().with_limits(Some(90.0), Some(100.0)),
        foods()[2].clone().with_limits(Some(100.0), Some(100.0)),
    ];

    let report = plan_meals(&selection, &targets(), &config(3), &MicroLpSolver).unwrap();

    assert_eq!(report.solutions.len(), 2);
    assert!(matches!(report.state, SearchState::Exhausted(_)));
    assert_eq!(report.solutions[0].blocks_of("Chicken"), Some(10));
    assert_eq!(report.solutions[1].blocks_of("Chicken"), Some(11));
    assert_eq!(report.solutions[1].blocks_of("Rice"), Some(9));
}

#[test]
fn test_counts_respect_bounds() {
    logging::init_test();

    let selection = vec![
        foods()[0].clone().with_limits(Some(120.0), None),
        foods()[1].clone(),
        foods()[2].clone().with_limits(None, Some(150.0)),
    ];

    let report = plan_meals(&selection, &targets(), &config(4), &MicroLpSolver).unwrap();
    assert!(!report.solutions.is_empty());

    for solution in &report.solutions {
        for (food, allocation) in selection.iter().zip(&solution.allocations) {
            let bounds = derive_bounds(food).unwrap();
            assert!(bounds.contains(allocation.blocks), "{} out of {}", allocation.blocks, bounds);
        }
    }

    let best = report.best().unwrap();
    assert_eq!(best.blocks_of("Chicken"), Some(12));
    assert_float_absolute_eq!(best.objective, 0.4, 1e-6);
}

#[test]
fn test_infeasible_calories_is_not_an_error() {
    logging::init_test();

    // 8 kcal blocks can never add up to 250 kcal.
    let report = plan_meals(&foods()[..1], &targets(), &config(3), &MicroLpSolver).unwrap();

    assert!(report.is_infeasible());
    assert!(report.solutions.is_empty());
}

#[test]
fn test_min_above_max_fails_before_solving() {
    let mut selection = foods();
    selection[1] = selection[1].clone().with_limits(Some(50.0), Some(40.0));
    let solver = CountingSolver::default();

    let result = plan_meals(&selection, &targets(), &config(3), &solver);

    assert!(matches!(result, Err(DietError::Model(_))));
    assert_eq!(solver.calls.get(), 0);
}

#[test]
fn test_deterministic_across_runs() {
    let first = plan_meals(&foods(), &targets(), &config(4), &MicroLpSolver).unwrap();
    let second = plan_meals(&foods(), &targets(), &config(4), &MicroLpSolver).unwrap();

    let signatures = |r: &macro_blocks_rs::PlanReport| {
        r.solutions.iter().map(|s| s.signature()).collect::<Vec<_>>()
    };
    assert_eq!(signatures(&first), signatures(&second));
}

#[test]
fn test_unit_foods_use_single_piece_blocks() {
    logging::init_test();

    // Egg: 2 g protein + 1 g fat = 17 kcal. Bread (2-piece portion):
    // 3 g carbs + 1 g fat = 21 kcal per piece.
    let selection = vec![
        FoodItem::new("Egg", Unit::Units, 1.0, 2.0, 0.0, 1.0),
        FoodItem::new("Bread", Unit::Units, 2.0, 0.0, 6.0, 2.0),
    ];
    // 10 eggs + 5 breads hit every target.
    let targets = Targets::new(20.0, 15.0, 15.0).unwrap();

    let report = plan_meals(&selection, &targets, &config(1), &MicroLpSolver).unwrap();
    let best = report.best().unwrap();

    assert_eq!(best.blocks_of("Egg"), Some(10));
    assert_eq!(best.blocks_of("Bread"), Some(5));
    assert_float_absolute_eq!(best.allocations[0].amount, 10.0, 1e-9);
    assert_float_absolute_eq!(best.objective, 0.0, 1e-6);
}
