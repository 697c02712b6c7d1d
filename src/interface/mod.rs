pub mod export;
pub mod prompts;
pub mod render;

pub use export::{write_csv, write_json};
pub use prompts::prompt_food_selection;
pub use render::{display_catalog, display_plan_report};
