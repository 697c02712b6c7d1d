/// Energy factors in kcal per gram.
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Block size for foods measured in grams.
pub const GRAMS_BLOCK_SIZE: u32 = 10;

/// Block size for foods measured in pieces.
pub const UNITS_BLOCK_SIZE: u32 = 1;

/// Every selected food contributes at least this many blocks.
pub const MIN_BLOCKS_PER_FOOD: i64 = 1;

/// Default number of distinct plans to collect.
pub const DEFAULT_MAX_SOLUTIONS: usize = 5;

/// Big-M used by cuts when a food has neither a Max nor any calories
/// bounding its block count.
pub const DEFAULT_BIG_M_FALLBACK: f64 = 10_000.0;

/// Largest distance from an integer a solver value may have before a
/// warning is logged.
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Slack absorbed when flooring/ceiling derived bounds.
pub const BOUND_EPSILON: f64 = 1e-9;

/// Tolerance used when checking the calorie equality of a recorded plan.
pub const CALORIE_TOLERANCE: f64 = 1e-4;
