// Infrastructure: CSV input tables

pub mod constraint_loader;
pub mod error;
pub mod food_loader;

pub use constraint_loader::load_constraint_table;
pub use error::DataError;
pub use food_loader::{load_food_table, FoodSources};
