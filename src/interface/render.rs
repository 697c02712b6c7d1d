use crate::models::{FoodItem, Macro, Solution};
use crate::planner::{PlanReport, SearchState};

/// Print every ranked plan followed by the search outcome.
pub fn display_plan_report(report: &PlanReport) {
    if report.is_infeasible() {
        println!(
            "No combination of the selected foods reaches exactly {:.0} kcal.",
            report.target_calories()
        );
        println!("Try adding foods or loosening Min/Max limits.");
        return;
    }

    if report.solutions.is_empty() {
        println!("No plan found ({}).", report.state);
        return;
    }

    for (i, solution) in report.solutions.iter().enumerate() {
        display_solution(i + 1, solution, report);
    }

    println!("--- Search ---");
    println!("Plans found: {}", report.solutions.len());
    println!("Stopped: {}", report.state);
    if report.state == SearchState::Interrupted {
        println!("(time limit reached, more plans may exist)");
    }
    println!();
}

fn display_solution(rank: usize, solution: &Solution, report: &PlanReport) {
    println!();
    println!("=== Plan #{} (error {:.4}) ===", rank, solution.objective);
    println!();

    let width = solution
        .allocations
        .iter()
        .map(|a| a.food_name.len())
        .max()
        .unwrap_or(10);

    for allocation in &solution.allocations {
        println!(
            "  {:<width$}  {:>6.0} {:<2} ({:>3} blocks) - {:>6.1} kcal",
            allocation.food_name,
            allocation.amount,
            allocation.unit.symbol(),
            allocation.blocks,
            allocation.calories,
            width = width
        );
    }

    println!();
    println!(
        "  Calories: {:.1} kcal (target {:.0})",
        solution.calories,
        report.target_calories()
    );
    for m in Macro::ALL {
        println!(
            "  {:<8} {:>7.1} g (target {:>5.0} g, deviation {:.4})",
            m.label(),
            solution.totals.get(m),
            report.targets.get(m),
            solution.deviations.get(m)
        );
    }
    println!();
}

/// Print the catalog with block sizes and per-block yields.
pub fn display_catalog(foods: &[FoodItem]) {
    if foods.is_empty() {
        println!("Catalog: (empty)");
        return;
    }

    println!();
    println!("=== Catalog ({} items) ===", foods.len());
    println!();

    for food in foods {
        let block = food.per_block();
        let limits = match (food.min_amount, food.max_amount) {
            (None, None) => String::new(),
            (min, max) => format!(
                "  [min {} / max {}]",
                min.map_or("-".to_string(), |v| v.to_string()),
                max.map_or("-".to_string(), |v| v.to_string())
            ),
        };
        println!(
            "  {} ({}) - block {}{}: P:{:.1} C:{:.1} F:{:.1}, {:.1} kcal{}",
            food.name,
            food.unit,
            food.block_size(),
            food.unit.symbol(),
            block.protein,
            block.carbs,
            block.fat,
            block.calories(),
            limits
        );
    }

    println!();
}
