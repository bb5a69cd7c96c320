// Domain service interface for solving optimization problems
// Any backend adapter in `crate::solver` implements this contract

use super::models::{OptimizationProblem, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Domain service interface for optimization solvers
///
/// Backends are swapped through `SolverFactory` without touching the diet model.
pub trait SolverService: Send + Sync {
    /// Solve an optimization problem
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution>;

    /// Validate a problem without solving it
    fn validate(&self, problem: &OptimizationProblem) -> Result<()> {
        let mut errors = Vec::new();

        // Check objective has coefficients
        if problem.objective.coefficients.is_empty() {
            errors.push("Objective must have at least one coefficient".to_string());
        }

        let num_vars = problem.num_variables();

        // Check variables match objective
        if problem.variables.len() != num_vars {
            errors.push(format!(
                "Number of variables ({}) doesn't match objective coefficients ({})",
                problem.variables.len(),
                num_vars
            ));
        }

        // Check constraints
        for (i, constraint) in problem.constraints.iter().enumerate() {
            if constraint.num_variables() != num_vars {
                errors.push(format!(
                    "Constraint {} '{}' has {} coefficients but problem has {} variables",
                    i,
                    constraint.name,
                    constraint.num_variables(),
                    num_vars
                ));
            }
            if constraint.lower_bound > constraint.upper_bound {
                errors.push(format!(
                    "Constraint {} '{}' has lower bound ({}) > upper bound ({})",
                    i, constraint.name, constraint.lower_bound, constraint.upper_bound
                ));
            }
        }

        // Check variable bounds
        for (i, var) in problem.variables.iter().enumerate() {
            if let Some(upper) = var.upper_bound {
                if var.lower_bound > upper {
                    errors.push(format!(
                        "Variable {} '{}' has lower bound ({}) > upper bound ({})",
                        i, var.name, var.lower_bound, upper
                    ));
                }
            }
        }

        if problem.is_mixed_integer() && !self.supports_mip() {
            errors.push(format!("{} cannot solve integer variables", self.name()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver supports mixed-integer programming
    fn supports_mip(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Constraint, ObjectiveFunction, Variable};

    struct LpOnly;

    impl SolverService for LpOnly {
        fn solve(&self, _problem: &OptimizationProblem) -> Result<Solution> {
            Err(SolverError::ExecutionFailed("not used".into()))
        }

        fn name(&self) -> &str {
            "lp-only"
        }

        fn supports_mip(&self) -> bool {
            false
        }
    }

    #[test]
    fn validate_accepts_consistent_problem() {
        let problem = OptimizationProblem::new(ObjectiveFunction::minimize(vec![1.0]))
            .with_variables(vec![Variable::continuous("x").with_bounds(0.0, Some(1.0))])
            .add_constraint(Constraint::range(vec![1.0], 0.5, f64::INFINITY));
        assert!(LpOnly.validate(&problem).is_ok());
    }

    #[test]
    fn validate_collects_every_problem() {
        let problem = OptimizationProblem::new(ObjectiveFunction::minimize(vec![1.0, 1.0]))
            .with_variables(vec![
                Variable::continuous("x").with_bounds(2.0, Some(1.0)),
                Variable::binary("y"),
            ])
            .add_constraint(Constraint::range(vec![1.0], 3.0, 1.0).with_name("bad"));

        let err = LpOnly.validate(&problem).unwrap_err().to_string();
        assert!(err.contains("Constraint 0 'bad' has 1 coefficients"));
        assert!(err.contains("lower bound (3) > upper bound (1)"));
        assert!(err.contains("Variable 0 'x'"));
        assert!(err.contains("lp-only cannot solve integer variables"));
    }
}
