// microlp adapter: pure-Rust simplex with branch-and-bound, the default backend

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution},
    solver_service::{Result, SolverService},
};
use crate::solver::good_lp_model::{build_constraints, build_model, interpret, GoodLpModel};
use good_lp::{solvers::microlp, SolverModel};
use std::time::Instant;
use tracing::debug;

pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MicroLpSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let start_time = Instant::now();
        let GoodLpModel {
            vars,
            lp_variables,
            objective,
        } = build_model(problem);

        let mut lp_model = vars.minimise(objective).using(microlp::microlp);
        for constraint in build_constraints(problem, &lp_variables) {
            lp_model = lp_model.with(constraint);
        }

        let outcome = lp_model.solve();

        let mut statistics = problem.statistics();
        statistics.solve_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        debug!(solve_time_ms = statistics.solve_time_ms, "microlp finished");

        interpret(outcome, problem, &lp_variables, statistics)
    }

    fn name(&self) -> &str {
        "microlp"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        models::{Constraint, ObjectiveFunction, Variable},
        value_objects::SolutionStatus,
    };

    #[test]
    fn solves_small_mixed_integer_problem() {
        // min x + 3y  s.t.  2 <= x + 4y <= 10,  x in [0, 1], y binary
        let problem = OptimizationProblem::new(ObjectiveFunction::minimize(vec![1.0, 3.0]))
            .with_name("mip")
            .with_variables(vec![
                Variable::continuous("x").with_bounds(0.0, Some(1.0)),
                Variable::binary("y"),
            ])
            .add_constraint(Constraint::range(vec![1.0, 4.0], 2.0, 10.0));

        let solution = MicroLpSolver::new().solve(&problem).unwrap();
        assert!(solution.is_optimal());
        assert!((solution.variable_values[1] - 1.0).abs() < 1e-6);
        assert!(solution.variable_values[0].abs() < 1e-6);
        assert!((solution.optimal_value.unwrap() - 3.0).abs() < 1e-6);
        assert_eq!(solution.statistics.num_binary_vars, 1);
        assert_eq!(solution.status, SolutionStatus::Optimal);
    }

    #[test]
    fn reports_infeasible_ranges() {
        let problem = OptimizationProblem::new(ObjectiveFunction::minimize(vec![1.0]))
            .with_variables(vec![Variable::continuous("x").with_bounds(0.0, Some(1.0))])
            .add_constraint(Constraint::range(vec![1.0], 5.0, f64::INFINITY));

        let solution = MicroLpSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(!solution.is_feasible());
    }
}
