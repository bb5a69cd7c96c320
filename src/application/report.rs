// Console report for a diet run

use std::io::{self, Write};

use super::diet_service::{DietOutcome, DietPlan};
use crate::domain::{
    food::{ConstraintTable, NutrientBound},
    value_objects::SolutionStatus,
};

/// First letter upper case, the rest lower case
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn bound_value(value: f64) -> String {
    if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        value.to_string()
    }
}

pub fn write_variables(out: &mut impl Write, plan: &DietPlan) -> io::Result<()> {
    writeln!(out, "Number of variables: {}", plan.solution.statistics.num_variables)?;
    writeln!(out, "Variables:\n")?;
    for variable in &plan.problem.variables {
        writeln!(out, "  - {}", capitalize(&variable.name))?;
    }
    writeln!(out)
}

pub fn write_constraints(out: &mut impl Write, constraints: &ConstraintTable) -> io::Result<()> {
    writeln!(out, "Number of constraints = {}", constraints.len())?;
    writeln!(out, "Constraints: \n")?;
    for bound in constraints {
        writeln!(
            out,
            "  {:>4} < {:<15} < {:>6}",
            bound_value(bound.min),
            bound.nutrient,
            bound_value(bound.max)
        )?;
    }
    writeln!(out)
}

fn write_removed(out: &mut impl Write, removed: &[NutrientBound]) -> io::Result<()> {
    for bound in removed {
        writeln!(
            out,
            "Optimal solution found after removing constraint '{} < {} < {}'",
            bound_value(bound.min),
            bound.nutrient,
            bound_value(bound.max)
        )?;
    }
    Ok(())
}

/// Selected foods, largest first, then the resulting nutrient intake
pub fn write_solution(out: &mut impl Write, plan: &DietPlan) -> io::Result<()> {
    for food in plan.selected_foods() {
        if food.is_discrete {
            writeln!(out, "{:>5.0} unit of {:<40}", food.quantity, food.name)?;
        } else {
            writeln!(out, "{:>5.0} gr of {:<40}", food.grams(), food.name)?;
        }
    }

    let totals = plan.nutrient_totals();
    if !totals.is_empty() {
        writeln!(out, "\nNutrient totals:")?;
        for total in totals {
            writeln!(
                out,
                "  {:<20} {:>10.2}   [{}, {}]",
                total.nutrient,
                total.total,
                bound_value(total.min),
                bound_value(total.max)
            )?;
        }
    }
    Ok(())
}

/// Full report for one run: model summary, status and the chosen diet.
///
/// `constraints` is the table left after relaxation; the listing shows the
/// table the first model was built from, dropped bounds included.
pub fn write_report(
    out: &mut impl Write,
    outcome: &DietOutcome,
    constraints: &ConstraintTable,
) -> io::Result<()> {
    let plan = &outcome.plan;
    write_variables(out, plan)?;

    let mut initial = constraints.clone();
    for bound in outcome.removed.iter().rev() {
        initial.set(bound.clone());
    }
    write_constraints(out, &initial)?;

    let solution = &plan.solution;
    match solution.status {
        SolutionStatus::Optimal => {
            if outcome.was_relaxed() {
                writeln!(out, "The problem does not have an optimal solution!")?;
                write_removed(out, &outcome.removed)?;
            } else {
                writeln!(out, "\nOptimal solution found.")?;
            }
        }
        SolutionStatus::Feasible => {
            writeln!(out, "The problem does not have an optimal solution!")?;
            writeln!(out, "A feasible solution was found.")?;
        }
        status => {
            writeln!(out, "The solver could not solve the problem ({status}).")?;
            return Ok(());
        }
    }

    if let Some(value) = solution.optimal_value {
        writeln!(out, "Objective value: {value:.2}\n")?;
    }
    write_solution(out, plan)
}
