use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DietError, Result};
use crate::models::Macros;
use crate::planner::constants::{GRAMS_BLOCK_SIZE, UNITS_BLOCK_SIZE};

/// How a food is measured in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "Gramas")]
    Grams,

    #[serde(rename = "Unidades")]
    Units,
}

impl Unit {
    /// Size of one allocatable block: 10 g for weighed foods, one piece otherwise.
    #[inline]
    pub fn block_size(self) -> u32 {
        match self {
            Unit::Grams => GRAMS_BLOCK_SIZE,
            Unit::Units => UNITS_BLOCK_SIZE,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Units => "un",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Grams => write!(f, "Gramas"),
            Unit::Units => write!(f, "Unidades"),
        }
    }
}

/// A catalog entry. Macros are given per portion; `min_amount`/`max_amount`
/// are in the food's own unit (grams or pieces).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(rename = "Nome", alias = "Name")]
    pub name: String,

    #[serde(rename = "Unidade", default)]
    pub unit: Unit,

    #[serde(rename = "Porcao")]
    pub portion_size: f64,

    #[serde(rename = "Proteina")]
    pub protein: f64,

    #[serde(rename = "Carboidrato")]
    pub carbs: f64,

    #[serde(rename = "Gordura")]
    pub fat: f64,

    #[serde(rename = "Min", default, skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,

    #[serde(rename = "Max", default, skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
}

impl FoodItem {
    pub fn new(name: &str, unit: Unit, portion_size: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            name: name.to_string(),
            unit,
            portion_size,
            protein,
            carbs,
            fat,
            min_amount: None,
            max_amount: None,
        }
    }

    /// Builder-style usage limits.
    pub fn with_limits(mut self, min_amount: Option<f64>, max_amount: Option<f64>) -> Self {
        self.min_amount = min_amount;
        self.max_amount = max_amount;
        self
    }

    #[inline]
    pub fn block_size(&self) -> u32 {
        self.unit.block_size()
    }

    /// Macros delivered by a single block.
    pub fn per_block(&self) -> Macros {
        let factor = f64::from(self.block_size()) / self.portion_size;
        Macros::new(self.protein, self.carbs, self.fat).scaled(factor)
    }

    /// Calories delivered by a single block.
    pub fn calories_per_block(&self) -> f64 {
        self.per_block().calories()
    }

    /// Catalog-level checks, including `Min <= Max`.
    pub fn validate(&self) -> Result<()> {
        self.validate_fields()?;
        if let (Some(min), Some(max)) = (self.min_amount, self.max_amount) {
            if min > max {
                return Err(DietError::Config(format!(
                    "{}: Min ({}) is greater than Max ({})",
                    self.name, min, max
                )));
            }
        }
        Ok(())
    }

    /// Per-field checks only. Limit ordering is left to bound derivation.
    pub fn validate_fields(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DietError::Config("food name must not be empty".to_string()));
        }
        if !self.portion_size.is_finite() || self.portion_size <= 0.0 {
            return Err(DietError::Config(format!(
                "{}: portion size must be positive, got {}",
                self.name, self.portion_size
            )));
        }
        for (label, value) in [
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DietError::Config(format!(
                    "{}: {} per portion must be non-negative, got {}",
                    self.name, label, value
                )));
            }
        }
        for (label, limit) in [("Min", self.min_amount), ("Max", self.max_amount)] {
            match limit {
                Some(value) if !value.is_finite() || value < 0.0 => {
                    return Err(DietError::Config(format!(
                        "{}: {} must be non-negative, got {}",
                        self.name, label, value
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Canonical key for lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rice() -> FoodItem {
        FoodItem::new("Rice", Unit::Grams, 100.0, 2.5, 28.0, 0.3)
    }

    #[test]
    fn test_block_size_by_unit() {
        assert_eq!(Unit::Grams.block_size(), 10);
        assert_eq!(Unit::Units.block_size(), 1);
    }

    #[test]
    fn test_per_block_scales_portion() {
        let block = rice().per_block();
        assert!((block.carbs - 2.8).abs() < 1e-9);
        assert!((block.protein - 0.25).abs() < 1e-9);

        let egg = FoodItem::new("Egg", Unit::Units, 2.0, 12.0, 1.0, 10.0);
        let block = egg.per_block();
        assert!((block.protein - 6.0).abs() < 1e-9);
        assert!((egg.calories_per_block() - (24.0 + 2.0 + 45.0)).abs() < 1e-9);
    }

    #[test]
    fn test_unit_defaults_to_grams() {
        let food: FoodItem = serde_json::from_str(
            r#"{"Nome": "Oats", "Porcao": 40, "Proteina": 5, "Carboidrato": 27, "Gordura": 3}"#,
        )
        .unwrap();
        assert_eq!(food.unit, Unit::Grams);
        assert_eq!(food.min_amount, None);
    }

    #[test]
    fn test_validate() {
        assert!(rice().validate().is_ok());

        let mut bad = rice();
        bad.portion_size = 0.0;
        assert!(matches!(bad.validate(), Err(DietError::Config(_))));

        let bad = rice().with_limits(Some(50.0), Some(40.0));
        assert!(matches!(bad.validate(), Err(DietError::Config(_))));
        assert!(bad.validate_fields().is_ok());

        let mut bad = rice();
        bad.fat = -1.0;
        assert!(bad.validate().is_err());
    }
}
