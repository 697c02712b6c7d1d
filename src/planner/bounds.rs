use std::fmt;

use crate::error::{DietError, Result};
use crate::models::FoodItem;
use crate::planner::constants::{BOUND_EPSILON, MIN_BLOCKS_PER_FOOD};

/// Integer block-count range of one food. `upper == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBounds {
    pub lower: i64,
    pub upper: Option<i64>,
}

impl BlockBounds {
    pub fn contains(&self, blocks: i64) -> bool {
        blocks >= self.lower && self.upper.is_none_or(|upper| blocks <= upper)
    }

    /// True when the range holds exactly one value.
    pub fn is_fixed(&self) -> bool {
        self.upper == Some(self.lower)
    }
}

impl fmt::Display for BlockBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "[{}, {}]", self.lower, upper),
            None => write!(f, "[{}, inf)", self.lower),
        }
    }
}

/// Derive a food's block bounds from its optional Min/Max.
///
/// Lower is `ceil(min / block)` when a positive Min is set, otherwise one
/// block. Upper is `floor(max / block)` when a positive Max is set,
/// otherwise unbounded.
pub fn derive_bounds(food: &FoodItem) -> Result<BlockBounds> {
    let block = f64::from(food.block_size());

    let lower = match food.min_amount {
        Some(min) if min > 0.0 => ((min / block) - BOUND_EPSILON).ceil() as i64,
        _ => MIN_BLOCKS_PER_FOOD,
    }
    .max(MIN_BLOCKS_PER_FOOD);

    let upper = match food.max_amount {
        Some(max) if max > 0.0 => Some(((max / block) + BOUND_EPSILON).floor() as i64),
        _ => None,
    };

    let bounds = BlockBounds { lower, upper };
    if let Some(upper) = upper {
        if upper < lower {
            return Err(DietError::Model(format!(
                "{}: derived block bounds {} are empty (Min {:?}, Max {:?}, block {})",
                food.name, bounds, food.min_amount, food.max_amount, block
            )));
        }
    }
    Ok(bounds)
}
