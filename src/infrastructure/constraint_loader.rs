use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::info;

use super::error::{DataError, Result};
use crate::domain::food::{ConstraintTable, NutrientBound};

/// `nutrient,min,max` row; an empty min is 0 and an empty max is unbounded
#[derive(Debug, Deserialize)]
struct BoundRecord {
    nutrient: String,
    #[serde(default)]
    min: Option<f64>,
    #[serde(default)]
    max: Option<f64>,
}

/// Read a nutrient constraint table, keeping file order
pub fn load_constraint_table(path: &Path) -> Result<ConstraintTable> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(DataError::csv(path))?;

    let mut table = ConstraintTable::new();
    for record in reader.deserialize::<BoundRecord>() {
        let record = record.map_err(DataError::csv(path))?;
        let min = record.min.unwrap_or(0.0);
        let max = record.max.unwrap_or(f64::INFINITY);

        if table.contains(&record.nutrient) {
            return Err(DataError::DuplicateNutrient {
                path: path.to_path_buf(),
                nutrient: record.nutrient,
            });
        }
        if min > max {
            return Err(DataError::InvalidBounds {
                path: path.to_path_buf(),
                nutrient: record.nutrient,
                min,
                max,
            });
        }

        table.set(NutrientBound::new(record.nutrient, min, max));
    }

    info!(path = %path.display(), constraints = table.len(), "loaded constraint table");
    Ok(table)
}
