use std::collections::HashMap;

use strsim::jaro_winkler;

use crate::error::{DietError, Result};
use crate::models::FoodItem;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Validated, ordered food catalog with case-insensitive lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    foods: Vec<FoodItem>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Validate every record and reject duplicate names.
    pub fn new(foods: Vec<FoodItem>) -> Result<Self> {
        let mut index = HashMap::with_capacity(foods.len());
        for (i, food) in foods.iter().enumerate() {
            food.validate()?;
            if index.insert(food.key(), i).is_some() {
                return Err(DietError::Config(format!(
                    "duplicate food name in catalog: {}",
                    food.name
                )));
            }
        }
        Ok(Self { foods, index })
    }

    /// Get a food by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&FoodItem> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.foods[i])
    }

    /// Closest catalog name, if any is similar enough.
    pub fn suggest(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        self.foods
            .iter()
            .map(|f| (f, jaro_winkler(&f.key(), &needle)))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| f.name.as_str())
    }

    /// Resolve names into an ordered selection, in the order given.
    pub fn select(&self, names: &[String]) -> Result<Vec<FoodItem>> {
        if names.is_empty() {
            return Err(DietError::NoFoodsSelected);
        }

        let mut selection: Vec<FoodItem> = Vec::with_capacity(names.len());
        for name in names {
            let food = self.get(name).ok_or_else(|| match self.suggest(name) {
                Some(close) => DietError::FoodNotFound(format!("{} (did you mean '{}'?)", name, close)),
                None => DietError::FoodNotFound(name.clone()),
            })?;
            if selection.iter().any(|f| f.key() == food.key()) {
                continue;
            }
            selection.push(food.clone());
        }
        Ok(selection)
    }

    /// Foods at the given catalog positions, in the order given.
    pub fn select_indices(&self, indices: &[usize]) -> Result<Vec<FoodItem>> {
        if indices.is_empty() {
            return Err(DietError::NoFoodsSelected);
        }
        indices
            .iter()
            .map(|&i| {
                self.foods
                    .get(i)
                    .cloned()
                    .ok_or_else(|| DietError::FoodNotFound(format!("catalog entry #{}", i + 1)))
            })
            .collect()
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}
