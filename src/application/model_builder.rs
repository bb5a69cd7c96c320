// Model builder: turns foods and nutrient bounds into a linear program
//
// One variable per food, measured in units of 100 g (or whole units for
// discrete foods), so per-100g nutrient amounts are the coefficients as-is.

use super::error::{DietError, Result};
use crate::domain::{
    food::{ConstraintTable, FoodTable},
    models::{Constraint, ObjectiveFunction, OptimizationProblem, SolverConfig, Variable},
};

/// Binary variables for discrete foods, bounded continuous ones otherwise
pub fn create_variables(foods: &FoodTable) -> Vec<Variable> {
    foods
        .iter()
        .map(|food| {
            let metadata = &food.metadata;
            if metadata.is_discrete {
                Variable::binary(&food.name)
            } else {
                Variable::continuous(&food.name).with_bounds(
                    metadata.min_amount_gr / 100.0,
                    Some(metadata.max_amount_gr / 100.0),
                )
            }
        })
        .collect()
}

/// One range constraint per nutrient bound, in table order
pub fn create_constraints(
    foods: &FoodTable,
    constraints: &ConstraintTable,
) -> Result<Vec<Constraint>> {
    constraints
        .iter()
        .map(|bound| {
            if !foods.has_column(&bound.nutrient) {
                return Err(DietError::UnknownNutrient(bound.nutrient.clone()));
            }

            // e.g. 2.5 g protein per 100 g of potatoes * (100 g units of potatoes)
            let coefficients = foods.iter().map(|food| food.value(&bound.nutrient)).collect();
            Ok(Constraint::range(coefficients, bound.min, bound.max).with_name(&bound.nutrient))
        })
        .collect()
}

/// Minimize total glycemic load
pub fn create_objective(foods: &FoodTable) -> ObjectiveFunction {
    ObjectiveFunction::minimize(foods.iter().map(|food| food.glycemic_load()).collect())
}

pub fn build_problem(
    foods: &FoodTable,
    constraints: &ConstraintTable,
    solver_config: SolverConfig,
) -> Result<OptimizationProblem> {
    Ok(OptimizationProblem::new(create_objective(foods))
        .with_name("stigler-diet")
        .with_variables(create_variables(foods))
        .with_constraints(create_constraints(foods, constraints)?)
        .with_config(solver_config))
}
