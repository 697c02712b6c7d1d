mod food;
mod macros;
mod solution;

pub use food::{FoodItem, Unit};
pub use macros::{Macro, Macros, Targets};
pub use solution::{Allocation, Solution, SolutionSignature};
