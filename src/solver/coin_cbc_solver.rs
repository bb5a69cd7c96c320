use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution},
    solver_service::{Result, SolverService},
};
use crate::solver::good_lp_model::{build_constraints, build_model, interpret, GoodLpModel};
use good_lp::{solvers::coin_cbc, SolverModel};
use std::time::Instant;

pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        // Validate first
        self.validate(problem)?;

        let start_time = Instant::now();
        let GoodLpModel {
            vars,
            lp_variables,
            objective,
        } = build_model(problem);

        let mut lp_model = vars.minimise(objective).using(coin_cbc::coin_cbc);
        lp_model.set_parameter("log", if problem.solver_config.verbose { "1" } else { "0" });

        for constraint in build_constraints(problem, &lp_variables) {
            lp_model = lp_model.with(constraint);
        }

        let outcome = lp_model.solve();

        let mut statistics = problem.statistics();
        statistics.solve_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        interpret(outcome, problem, &lp_variables, statistics)
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn supports_mip(&self) -> bool {
        true
    }
}
