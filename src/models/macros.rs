use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::DietError;
use crate::planner::constants::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};

/// One of the three tracked macro-nutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Macro {
    Protein,
    Carbs,
    Fat,
}

impl Macro {
    pub const ALL: [Macro; 3] = [Macro::Protein, Macro::Carbs, Macro::Fat];

    /// Energy density in kcal per gram.
    pub fn kcal_per_gram(self) -> f64 {
        match self {
            Macro::Protein => KCAL_PER_GRAM_PROTEIN,
            Macro::Carbs => KCAL_PER_GRAM_CARBS,
            Macro::Fat => KCAL_PER_GRAM_FAT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Macro::Protein => "protein",
            Macro::Carbs => "carbs",
            Macro::Fat => "fat",
        }
    }
}

/// Grams of protein, carbs and fat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(rename = "Proteina")]
    pub protein: f64,

    #[serde(rename = "Carboidrato")]
    pub carbs: f64,

    #[serde(rename = "Gordura")]
    pub fat: f64,
}

impl Macros {
    pub fn new(protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }

    #[inline]
    pub fn get(&self, m: Macro) -> f64 {
        match m {
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }

    /// Energy at 4/4/9 kcal per gram.
    #[inline]
    pub fn calories(&self) -> f64 {
        Macro::ALL
            .iter()
            .map(|&m| self.get(m) * m.kcal_per_gram())
            .sum()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

/// Daily macro targets in grams, all strictly positive.
///
/// Deserialization goes through [`TryFrom<Macros>`] so a bad targets file is
/// rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Macros", into = "Macros")]
pub struct Targets(Macros);

impl Targets {
    pub fn new(protein: f64, carbs: f64, fat: f64) -> Result<Self, DietError> {
        Self::try_from(Macros::new(protein, carbs, fat))
    }

    #[inline]
    pub fn get(&self, m: Macro) -> f64 {
        self.0.get(m)
    }

    pub fn macros(&self) -> &Macros {
        &self.0
    }

    /// Calories the plan must hit exactly.
    pub fn calories(&self) -> f64 {
        self.0.calories()
    }

    /// Objective weight of a macro: the reciprocal of its target.
    pub fn weight(&self, m: Macro) -> f64 {
        1.0 / self.get(m)
    }
}

impl TryFrom<Macros> for Targets {
    type Error = DietError;

    fn try_from(macros: Macros) -> Result<Self, Self::Error> {
        for m in Macro::ALL {
            let value = macros.get(m);
            if !value.is_finite() || value <= 0.0 {
                return Err(DietError::Config(format!(
                    "{} target must be a positive number of grams, got {}",
                    m.label(),
                    value
                )));
            }
        }
        Ok(Self(macros))
    }
}

impl From<Targets> for Macros {
    fn from(targets: Targets) -> Self {
        targets.0
    }
}
