// Translation between domain problems and good_lp models, shared by the
// good_lp-backed adapters

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError},
    value_objects::{SolutionStatus as DomainSolutionStatus, VariableType},
};
use good_lp::{
    constraint, variable, Constraint as GoodLpConstraint, Expression, ProblemVariables,
    ResolutionError, Solution as GoodLpSolutionTrait, Variable as GoodLpVariable,
};

/// good_lp variables plus the (always minimised) objective
pub(crate) struct GoodLpModel {
    pub vars: ProblemVariables,
    pub lp_variables: Vec<GoodLpVariable>,
    pub objective: Expression,
}

pub(crate) fn build_model(problem: &OptimizationProblem) -> GoodLpModel {
    let mut vars = ProblemVariables::new();
    let mut lp_variables = Vec::with_capacity(problem.variables.len());

    for var_def in &problem.variables {
        let lower = var_def.lower_bound;
        let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);

        let var = match var_def.variable_type {
            VariableType::Binary => {
                vars.add(variable().integer().min(lower).max(upper).name(&var_def.name))
            }
            VariableType::Continuous => {
                vars.add(variable().min(lower).max(upper).name(&var_def.name))
            }
        };
        lp_variables.push(var);
    }

    let mut objective: Expression = 0.into();
    for (i, &coeff) in problem.objective.coefficients.iter().enumerate() {
        if coeff != 0.0 {
            objective += coeff * lp_variables[i];
        }
    }

    GoodLpModel {
        vars,
        lp_variables,
        objective,
    }
}

/// Range constraints become one or two good_lp constraints; infinite sides are skipped
pub(crate) fn build_constraints(
    problem: &OptimizationProblem,
    lp_variables: &[GoodLpVariable],
) -> Vec<GoodLpConstraint> {
    let mut constraints = Vec::with_capacity(problem.constraints.len());

    for range in &problem.constraints {
        let mut lhs: Expression = 0.into();
        for (i, &coeff) in range.coefficients.iter().enumerate() {
            if coeff != 0.0 {
                lhs += coeff * lp_variables[i];
            }
        }

        let (lower, upper) = (range.lower_bound, range.upper_bound);
        if lower == upper {
            constraints.push(constraint::eq(lhs, lower));
            continue;
        }
        if lower.is_finite() {
            constraints.push(constraint::geq(lhs.clone(), lower));
        }
        if upper.is_finite() {
            constraints.push(constraint::leq(lhs, upper));
        }
    }

    constraints
}

/// Map a good_lp outcome onto the domain solution
pub(crate) fn interpret<S: GoodLpSolutionTrait>(
    outcome: std::result::Result<S, ResolutionError>,
    problem: &OptimizationProblem,
    lp_variables: &[GoodLpVariable],
    statistics: SolverStatistics,
) -> Result<DomainSolution> {
    match outcome {
        Ok(sol) => {
            let variable_values: Vec<f64> =
                lp_variables.iter().map(|&var| sol.value(var)).collect();
            let actual_obj = problem.objective.value_at(&variable_values);

            let mut solution = DomainSolution::optimal(actual_obj, variable_values);
            solution.statistics = statistics;
            solution.message = format!("Optimal solution found for '{}'", problem.name);
            Ok(solution)
        }
        Err(ResolutionError::Infeasible) => {
            let mut solution = DomainSolution::new(
                DomainSolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            );
            solution.statistics = statistics;
            Ok(solution)
        }
        Err(ResolutionError::Unbounded) => {
            let mut solution = DomainSolution::new(
                DomainSolutionStatus::Unbounded,
                "Problem is unbounded: objective can be improved infinitely",
            );
            solution.statistics = statistics;
            Ok(solution)
        }
        Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
    }
}
