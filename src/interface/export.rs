use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::planner::PlanReport;

/// One row per (plan, food), ranked best first.
pub fn write_csv(report: &PlanReport, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "rank",
        "objective",
        "food",
        "unit",
        "blocks",
        "amount",
        "protein",
        "carbs",
        "fat",
        "calories",
    ])?;

    for (i, solution) in report.solutions.iter().enumerate() {
        for allocation in &solution.allocations {
            wtr.write_record([
                (i + 1).to_string(),
                format!("{:.6}", solution.objective),
                allocation.food_name.clone(),
                allocation.unit.to_string(),
                allocation.blocks.to_string(),
                format!("{:.0}", allocation.amount),
                format!("{:.2}", allocation.macros.protein),
                format!("{:.2}", allocation.macros.carbs),
                format!("{:.2}", allocation.macros.fat),
                format!("{:.2}", allocation.calories),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Ranked plans plus targets and the terminal state as pretty JSON.
pub fn write_json(report: &PlanReport, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "targets": report.targets,
        "target_calories": report.target_calories(),
        "state": report.state.to_string(),
        "solutions": report.solutions,
    });
    fs::write(path, serde_json::to_string_pretty(&json)?)?;
    Ok(())
}
