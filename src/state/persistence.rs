use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::{FoodItem, Macros, Targets};
use crate::state::Catalog;

/// Load and validate a food catalog from a JSON array.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let content = fs::read_to_string(path)?;
    let foods: Vec<FoodItem> = serde_json::from_str(&content)?;
    Catalog::new(foods)
}

/// Load macro targets. Non-positive values are a configuration error.
pub fn load_targets<P: AsRef<Path>>(path: P) -> Result<Targets> {
    let content = fs::read_to_string(path)?;
    let macros: Macros = serde_json::from_str(&content)?;
    Targets::try_from(macros)
}
