use dialoguer::MultiSelect;

use crate::error::{DietError, Result};
use crate::models::FoodItem;
use crate::state::Catalog;

/// Let the user tick the foods to plan with. Order follows the catalog.
pub fn prompt_food_selection(catalog: &Catalog) -> Result<Vec<FoodItem>> {
    let labels: Vec<String> = catalog
        .foods()
        .iter()
        .map(|f| format!("{} ({})", f.name, f.unit))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Select the foods for the menu (space to toggle, enter to confirm)")
        .items(&labels)
        .interact()?;

    if picked.is_empty() {
        return Err(DietError::NoFoodsSelected);
    }
    catalog.select_indices(&picked)
}
