// Application layer: diet planning use cases and console reporting

pub mod diet_service;
pub mod error;
pub mod model_builder;
pub mod report;

pub use diet_service::{DietOutcome, DietPlan, DietPlanner, NutrientTotal, SelectedFood};
pub use error::DietError;
