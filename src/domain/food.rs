// Diet domain: foods with their per-100g profiles and the nutrient bounds a diet must meet

use std::collections::HashMap;
use std::fmt;

/// Join key shared by every input table
pub const NDB_NO: &str = "NDB_No";
/// Food name column, used as the food key
pub const SHORT_DESCRIPTION: &str = "Shrt_Desc";
pub const CARBOHYDRATE: &str = "Carbohydrt_(g)";
pub const FIBER: &str = "Fiber_TD_(g)";
pub const AVAILABLE_CARBS: &str = "available_carbs_(g)";
pub const GLYCEMIC_INDEX: &str = "GI";
pub const GLYCEMIC_LOAD: &str = "GL";
pub const IS_DISCRETE: &str = "is_discrete";
pub const MIN_AMOUNT_GR: &str = "min_amount_gr";
pub const MAX_AMOUNT_GR: &str = "max_amount_gr";

/// Text columns that never become part of a food's nutrient profile
pub const NON_NUTRIENT_COLUMNS: [&str; 4] = [SHORT_DESCRIPTION, NDB_NO, "GmWt_Desc1", "GmWt_Desc2"];

/// Per-food planning metadata from the extra-info table
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FoodMetadata {
    pub glycemic_index: f64,
    pub is_discrete: bool,
    pub min_amount_gr: f64,
    pub max_amount_gr: f64,
}

/// A food and its nutrient amounts per 100 g
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub name: String,
    pub ndb_no: String,
    pub nutrients: HashMap<String, f64>,
    pub metadata: FoodMetadata,
}

impl Food {
    /// Build a food from raw nutrient amounts, deriving available
    /// carbohydrates and glycemic load. Missing inputs count as zero.
    pub fn new(
        name: impl Into<String>,
        ndb_no: impl Into<String>,
        mut nutrients: HashMap<String, f64>,
        metadata: FoodMetadata,
    ) -> Self {
        let available_carbs = match (nutrients.get(CARBOHYDRATE), nutrients.get(FIBER)) {
            (Some(carbs), Some(fiber)) => carbs - fiber,
            _ => 0.0,
        };
        nutrients.insert(AVAILABLE_CARBS.to_string(), available_carbs);
        nutrients.insert(
            GLYCEMIC_LOAD.to_string(),
            metadata.glycemic_index * available_carbs / 100.0,
        );

        Self {
            name: name.into(),
            ndb_no: ndb_no.into(),
            nutrients,
            metadata,
        }
    }

    pub fn available_carbs(&self) -> f64 {
        self.value(AVAILABLE_CARBS)
    }

    pub fn glycemic_load(&self) -> f64 {
        self.value(GLYCEMIC_LOAD)
    }

    /// Amount of `column` per 100 g (or per unit for discrete foods).
    /// Metadata columns are addressable too; anything unknown is zero.
    pub fn value(&self, column: &str) -> f64 {
        match column {
            GLYCEMIC_INDEX => self.metadata.glycemic_index,
            IS_DISCRETE => f64::from(u8::from(self.metadata.is_discrete)),
            MIN_AMOUNT_GR => self.metadata.min_amount_gr,
            MAX_AMOUNT_GR => self.metadata.max_amount_gr,
            _ => self.nutrients.get(column).copied().unwrap_or(0.0),
        }
    }
}

/// Foods in load order, keyed by name, with the union of all known columns
#[derive(Debug, Clone, Default)]
pub struct FoodTable {
    foods: Vec<Food>,
    index: HashMap<String, usize>,
    columns: Vec<String>,
}

impl FoodTable {
    pub fn new() -> Self {
        let mut table = Self::default();
        for column in [
            AVAILABLE_CARBS,
            GLYCEMIC_INDEX,
            GLYCEMIC_LOAD,
            IS_DISCRETE,
            MIN_AMOUNT_GR,
            MAX_AMOUNT_GR,
        ] {
            table.add_column(column);
        }
        table
    }

    /// Register a column name as known
    pub fn add_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Insert a food; a food with the same name is replaced in place and
    /// returned.
    pub fn insert(&mut self, food: Food) -> Option<Food> {
        for column in food.nutrients.keys() {
            if !self.has_column(column) {
                self.columns.push(column.clone());
            }
        }

        match self.index.get(&food.name) {
            Some(&position) => Some(std::mem::replace(&mut self.foods[position], food)),
            None => {
                self.index.insert(food.name.clone(), self.foods.len());
                self.foods.push(food);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Food> {
        self.index.get(name).map(|&i| &self.foods[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Food> {
        self.foods.iter()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

impl<'a> IntoIterator for &'a FoodTable {
    type Item = &'a Food;
    type IntoIter = std::slice::Iter<'a, Food>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Daily intake range for one nutrient
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientBound {
    pub nutrient: String,
    pub min: f64,
    pub max: f64,
}

impl NutrientBound {
    pub fn new(nutrient: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            nutrient: nutrient.into(),
            min,
            max,
        }
    }
}

impl fmt::Display for NutrientBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} < {} < {}", self.min, self.nutrient, self.max)
    }
}

/// Ordered nutrient → (min, max) table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintTable {
    bounds: Vec<NutrientBound>,
}

impl ConstraintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the bound for a nutrient, keeping its position
    pub fn set(&mut self, bound: NutrientBound) {
        match self.bounds.iter_mut().find(|b| b.nutrient == bound.nutrient) {
            Some(existing) => *existing = bound,
            None => self.bounds.push(bound),
        }
    }

    pub fn with(mut self, nutrient: impl Into<String>, min: f64, max: f64) -> Self {
        self.set(NutrientBound::new(nutrient, min, max));
        self
    }

    pub fn get(&self, nutrient: &str) -> Option<&NutrientBound> {
        self.bounds.iter().find(|b| b.nutrient == nutrient)
    }

    pub fn contains(&self, nutrient: &str) -> bool {
        self.get(nutrient).is_some()
    }

    /// Remove the most recently added bound
    pub fn pop(&mut self) -> Option<NutrientBound> {
        self.bounds.pop()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NutrientBound> {
        self.bounds.iter()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Built-in adult daily intake table, keyed by USDA ABBREV column names
    pub fn default_daily() -> Self {
        const INF: f64 = f64::INFINITY;
        Self::new()
            .with("Energ_Kcal", 1800.0, 2400.0)
            .with("Protein_(g)", 90.0, 180.0)
            .with("Lipid_Tot_(g)", 50.0, 120.0)
            .with("Carbohydrt_(g)", 0.0, 150.0)
            .with("Fiber_TD_(g)", 30.0, 70.0)
            .with("Sugar_Tot_(g)", 0.0, 40.0)
            .with("Calcium_(mg)", 1000.0, 2500.0)
            .with("Iron_(mg)", 8.0, 45.0)
            .with("Magnesium_(mg)", 400.0, INF)
            .with("Phosphorus_(mg)", 700.0, 4000.0)
            .with("Potassium_(mg)", 3400.0, INF)
            .with("Sodium_(mg)", 500.0, 2300.0)
            .with("Zinc_(mg)", 11.0, 40.0)
            .with("Vit_C_(mg)", 90.0, 2000.0)
            .with("Thiamin_(mg)", 1.2, INF)
            .with("Riboflavin_(mg)", 1.3, INF)
            .with("Niacin_(mg)", 16.0, 35.0)
            .with("Vit_B6_(mg)", 1.3, 100.0)
            .with("Folate_Tot_(µg)", 400.0, INF)
            .with("Vit_B12_(µg)", 2.4, INF)
            .with("Vit_A_RAE", 900.0, 3000.0)
            .with("Vit_E_(mg)", 15.0, 1000.0)
            .with("Vit_K_(µg)", 120.0, INF)
            .with("Cholestrl_(mg)", 0.0, 300.0)
    }
}

impl<'a> IntoIterator for &'a ConstraintTable {
    type Item = &'a NutrientBound;
    type IntoIter = std::slice::Iter<'a, NutrientBound>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrients(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn derives_available_carbs_and_glycemic_load() {
        let food = Food::new(
            "BREAD",
            "18069",
            nutrients(&[(CARBOHYDRATE, 49.0), (FIBER, 4.0)]),
            FoodMetadata {
                glycemic_index: 70.0,
                ..FoodMetadata::default()
            },
        );
        assert_eq!(food.available_carbs(), 45.0);
        assert!((food.glycemic_load() - 31.5).abs() < 1e-12);
    }

    #[test]
    fn missing_fiber_zeroes_available_carbs() {
        let food = Food::new(
            "SUGAR",
            "19335",
            nutrients(&[(CARBOHYDRATE, 99.8)]),
            FoodMetadata {
                glycemic_index: 65.0,
                ..FoodMetadata::default()
            },
        );
        assert_eq!(food.available_carbs(), 0.0);
        assert_eq!(food.glycemic_load(), 0.0);
        assert_eq!(food.value("Protein_(g)"), 0.0);
    }

    #[test]
    fn metadata_columns_are_addressable() {
        let food = Food::new(
            "VITAMIN D PILL",
            "C001",
            HashMap::new(),
            FoodMetadata {
                glycemic_index: 0.0,
                is_discrete: true,
                min_amount_gr: 0.0,
                max_amount_gr: 1.0,
            },
        );
        assert_eq!(food.value(IS_DISCRETE), 1.0);
        assert_eq!(food.value(MAX_AMOUNT_GR), 1.0);
    }

    #[test]
    fn food_table_replaces_duplicates_in_place() {
        let mut table = FoodTable::new();
        table.insert(Food::new("A", "1", nutrients(&[("x", 1.0)]), FoodMetadata::default()));
        table.insert(Food::new("B", "2", nutrients(&[("y", 1.0)]), FoodMetadata::default()));
        let replaced = table.insert(Food::new("A", "3", HashMap::new(), FoodMetadata::default()));

        assert_eq!(replaced.map(|f| f.ndb_no), Some("1".to_string()));
        let names: Vec<_> = table.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(table.get("A").map(|f| f.ndb_no.as_str()), Some("3"));
        assert!(table.has_column("x"));
        assert!(table.has_column(GLYCEMIC_LOAD));
    }

    #[test]
    fn constraint_table_keeps_insertion_order() {
        let mut table = ConstraintTable::new()
            .with("a", 1.0, 2.0)
            .with("b", 0.0, 5.0)
            .with("a", 3.0, 4.0);

        let order: Vec<_> = table.iter().map(|b| b.nutrient.as_str()).collect();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(table.get("a"), Some(&NutrientBound::new("a", 3.0, 4.0)));
        assert_eq!(table.pop().map(|b| b.nutrient), Some("b".to_string()));
        assert_eq!(table.pop().map(|b| b.max), Some(4.0));
        assert!(table.is_empty());
        assert_eq!(table.pop(), None);
    }

    #[test]
    fn default_table_bounds_are_ordered() {
        let table = ConstraintTable::default_daily();
        assert!(!table.is_empty());
        assert!(table.iter().all(|b| b.min <= b.max));
        assert!(table.contains("Protein_(g)"));
    }
}
