use crate::domain::solver_service::SolverError;
use crate::infrastructure::DataError;

/// Errors surfaced by the diet planning use cases
#[derive(Debug, thiserror::Error)]
pub enum DietError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("No food table column is named '{0}'")]
    UnknownNutrient(String),

    #[error("No optimal diet exists even after removing all {removed} constraints")]
    RelaxationExhausted { removed: usize },
}

pub type Result<T> = std::result::Result<T, DietError>;
