// Food table ingestion: nutrient database + custom foods, left-joined with per-food metadata

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use super::error::{DataError, Result};
use crate::domain::food::{
    Food, FoodMetadata, FoodTable, NDB_NO, NON_NUTRIENT_COLUMNS, SHORT_DESCRIPTION,
};

/// Locations of the three input tables
#[derive(Debug, Clone)]
pub struct FoodSources {
    pub db_path: PathBuf,
    pub custom_db_path: PathBuf,
    pub extra_info_path: PathBuf,
}

impl FoodSources {
    pub fn new(
        db_path: impl Into<PathBuf>,
        custom_db_path: impl Into<PathBuf>,
        extra_info_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            db_path: db_path.into(),
            custom_db_path: custom_db_path.into(),
            extra_info_path: extra_info_path.into(),
        }
    }
}

/// One row of the extra-info table. Columns other than these are ignored.
#[derive(Debug, Deserialize)]
struct ExtraInfoRecord {
    #[serde(rename = "NDB_No")]
    ndb_no: String,
    #[serde(rename = "GI", default)]
    glycemic_index: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_discrete: bool,
    #[serde(default)]
    min_amount_gr: Option<f64>,
    #[serde(default)]
    max_amount_gr: Option<f64>,
}

impl From<ExtraInfoRecord> for FoodMetadata {
    fn from(record: ExtraInfoRecord) -> Self {
        let or_zero = |v: Option<f64>| v.filter(|v| !v.is_nan()).unwrap_or(0.0);
        FoodMetadata {
            glycemic_index: or_zero(record.glycemic_index),
            is_discrete: record.is_discrete,
            min_amount_gr: or_zero(record.min_amount_gr),
            max_amount_gr: or_zero(record.max_amount_gr),
        }
    }
}

/// Accepts `0/1`, any number (non-zero is true), `true/false` and `yes/no`.
/// Empty is false.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "no" => Some(false),
        "true" | "yes" => Some(true),
        other => other
            .parse::<f64>()
            .ok()
            .map(|v| !v.is_nan() && v != 0.0),
    }
}

fn deserialize_flag<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid is_discrete flag '{raw}'")))
}

/// A food row from a nutrient table, before the metadata join
#[derive(Debug)]
struct NutrientRow {
    ndb_no: String,
    name: String,
    values: HashMap<String, f64>,
}

#[derive(Debug, Default)]
struct NutrientTable {
    columns: Vec<String>,
    rows: Vec<NutrientRow>,
}

fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| DataError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

/// Empty cells and `NaN` are missing values
fn parse_number(field: &str) -> std::result::Result<Option<f64>, ()> {
    if field.is_empty() {
        return Ok(None);
    }
    let value = field.parse::<f64>().map_err(|_| ())?;
    Ok(Some(value).filter(|v| !v.is_nan()))
}

fn read_nutrient_table(path: &Path) -> Result<NutrientTable> {
    // Short rows are allowed; their missing trailing cells count as empty
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(DataError::csv(path))?;
    let headers = reader.headers().map_err(DataError::csv(path))?.clone();

    let ndb_index = column_index(&headers, NDB_NO, path)?;
    let name_index = column_index(&headers, SHORT_DESCRIPTION, path)?;

    let columns: Vec<String> = headers
        .iter()
        .filter(|h| !NON_NUTRIENT_COLUMNS.contains(h))
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(DataError::csv(path))?;
        let line = record.position().map_or(0, |p| p.line());

        let mut values = HashMap::new();
        for (column, field) in headers.iter().zip(record.iter()) {
            if NON_NUTRIENT_COLUMNS.contains(&column) {
                continue;
            }
            let value = parse_number(field).map_err(|_| DataError::InvalidNumber {
                path: path.to_path_buf(),
                line,
                column: column.to_string(),
                value: field.to_string(),
            })?;
            if let Some(value) = value {
                values.insert(column.to_string(), value);
            }
        }

        rows.push(NutrientRow {
            ndb_no: record.get(ndb_index).unwrap_or_default().to_string(),
            name: record.get(name_index).unwrap_or_default().to_string(),
            values,
        });
    }

    debug!(path = %path.display(), rows = rows.len(), "read nutrient table");
    Ok(NutrientTable { columns, rows })
}

fn read_metadata(path: &Path) -> Result<HashMap<String, FoodMetadata>> {
    // Short rows are allowed; their missing trailing cells count as empty
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(DataError::csv(path))?;
    let headers = reader.headers().map_err(DataError::csv(path))?.clone();
    column_index(&headers, NDB_NO, path)?;

    let mut metadata = HashMap::new();
    for record in reader.deserialize::<ExtraInfoRecord>() {
        let record = record.map_err(DataError::csv(path))?;
        let ndb_no = record.ndb_no.clone();
        if metadata.insert(ndb_no.clone(), FoodMetadata::from(record)).is_some() {
            warn!(ndb_no = %ndb_no, "duplicate metadata row, keeping the later one");
        }
    }

    debug!(path = %path.display(), rows = metadata.len(), "read food metadata");
    Ok(metadata)
}

/// Load, filter and merge the three input tables into a `FoodTable`.
///
/// Nutrient-database rows are kept only when the metadata table lists their
/// `NDB_No`; custom foods are always kept. Missing values become zero.
pub fn load_food_table(sources: &FoodSources) -> Result<FoodTable> {
    let metadata = read_metadata(&sources.extra_info_path)?;
    let database = read_nutrient_table(&sources.db_path)?;
    let custom = read_nutrient_table(&sources.custom_db_path)?;

    let mut table = FoodTable::new();
    for column in database.columns.iter().chain(&custom.columns) {
        table.add_column(column);
    }

    let selected = database
        .rows
        .into_iter()
        .filter(|row| metadata.contains_key(&row.ndb_no));

    for row in selected.chain(custom.rows) {
        let food_metadata = match metadata.get(&row.ndb_no) {
            Some(m) => *m,
            None => {
                warn!(food = %row.name, ndb_no = %row.ndb_no, "no metadata row, defaulting to zero");
                FoodMetadata::default()
            }
        };

        let food = Food::new(row.name, row.ndb_no, row.values, food_metadata);
        if let Some(previous) = table.insert(food) {
            warn!(food = %previous.name, "duplicate food name, keeping the later row");
        }
    }

    info!(
        foods = table.len(),
        columns = table.columns().len(),
        "loaded food table"
    );
    Ok(table)
}
