// Domain layer: diet entities, optimization models and the solver contract
pub mod domain;

// Application layer: diet planning use cases and reporting
pub mod application;

// Infrastructure layer: CSV input tables
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverService
pub mod solver;

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use domain::{
    Constraint, ConstraintTable, Food, FoodMetadata, FoodTable, NutrientBound, ObjectiveFunction,
    OptimizationProblem, Solution, SolutionStatus, SolverBackend, SolverConfig,
    SolverError, SolverService, Variable, VariableType,
};

pub use application::{DietError, DietOutcome, DietPlan, DietPlanner, SelectedFood};
pub use config::Config;
pub use infrastructure::{load_constraint_table, load_food_table, DataError, FoodSources};
pub use solver::SolverFactory;

#[cfg(feature = "cbc")]
pub use solver::CoinCbcSolver;
#[cfg(feature = "highs")]
pub use solver::HighsSolver;
#[cfg(feature = "microlp")]
pub use solver::MicroLpSolver;
