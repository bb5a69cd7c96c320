use std::path::PathBuf;

/// Errors raised while reading the input tables
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}, line {line}: column '{column}' holds '{value}', which is not a number")]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{path}: nutrient '{nutrient}' is listed more than once")]
    DuplicateNutrient { path: PathBuf, nutrient: String },

    #[error("{path}: nutrient '{nutrient}' has min ({min}) > max ({max})")]
    InvalidBounds {
        path: PathBuf,
        nutrient: String,
        min: f64,
        max: f64,
    },
}

impl DataError {
    pub(crate) fn csv(path: impl Into<PathBuf>) -> impl FnOnce(csv::Error) -> Self {
        let path = path.into();
        move |source| DataError::Csv { path, source }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
