// Solve driver: builds the diet model, runs the configured solver and, when
// the model has no solution, relaxes nutrient bounds until one exists

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::{DietError, Result};
use super::model_builder::build_problem;
use crate::domain::{
    food::{ConstraintTable, FoodTable, NutrientBound},
    models::{verify_solution, OptimizationProblem, Solution, SolverConfig},
    solver_service::{SolverError, SolverService},
    value_objects::{SolutionStatus, VariableType},
};

/// Quantities at or below this are treated as "not selected"
pub const QUANTITY_EPSILON: f64 = 1e-9;

/// Tolerance used when checking a solution against its model
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A food picked by the solver
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFood {
    pub name: String,
    /// Whole units for discrete foods, 100 g units otherwise
    pub quantity: f64,
    pub is_discrete: bool,
}

impl SelectedFood {
    pub fn grams(&self) -> f64 {
        self.quantity * 100.0
    }
}

/// Intake of one constrained nutrient under a plan
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientTotal {
    pub nutrient: String,
    pub total: f64,
    pub min: f64,
    pub max: f64,
}

/// One solved model
#[derive(Debug, Clone)]
pub struct DietPlan {
    pub problem: OptimizationProblem,
    pub solution: Solution,
}

impl DietPlan {
    /// Foods with a non-zero quantity, largest quantity first
    pub fn selected_foods(&self) -> Vec<SelectedFood> {
        let mut selected: Vec<SelectedFood> = self
            .problem
            .variables
            .iter()
            .zip(&self.solution.variable_values)
            .filter(|&(_, &quantity)| quantity > QUANTITY_EPSILON)
            .map(|(var, &quantity)| SelectedFood {
                name: var.name.clone(),
                quantity,
                is_discrete: var.variable_type == VariableType::Binary,
            })
            .collect();

        selected.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
        selected
    }

    /// Totals for every nutrient still constrained in this model
    pub fn nutrient_totals(&self) -> Vec<NutrientTotal> {
        self.problem
            .constraints
            .iter()
            .map(|c| NutrientTotal {
                nutrient: c.name.clone(),
                total: c.activity(&self.solution.variable_values),
                min: c.lower_bound,
                max: c.upper_bound,
            })
            .collect()
    }
}

/// Result of a solve that may have dropped constraints
#[derive(Debug, Clone)]
pub struct DietOutcome {
    pub plan: DietPlan,
    /// Bounds dropped to reach an optimal plan, in removal order
    pub removed: Vec<NutrientBound>,
}

impl DietOutcome {
    pub fn was_relaxed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// Diet planning use case over a pluggable solver backend
pub struct DietPlanner {
    solver: Arc<dyn SolverService>,
    config: SolverConfig,
    tolerance: f64,
}

impl DietPlanner {
    pub fn new(solver: Arc<dyn SolverService>, config: SolverConfig) -> Self {
        Self {
            solver,
            config,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Build the model for the current constraint table and solve it once
    pub fn solve(&self, foods: &FoodTable, constraints: &ConstraintTable) -> Result<DietPlan> {
        let problem = build_problem(foods, constraints, self.config.clone())?;
        debug!(
            variables = problem.num_variables(),
            constraints = problem.constraints.len(),
            solver = self.solver.name(),
            "solving diet model"
        );

        // A model the backend rejects or gives up on is "unsolved", not fatal
        let mut solution = match self.solver.solve(&problem) {
            Ok(solution) => solution,
            Err(err @ SolverError::SolverNotAvailable(_)) => return Err(err.into()),
            Err(err) => {
                warn!(error = %err, solver = self.solver.name(), "solver gave no answer");
                Solution::new(SolutionStatus::Error, err.to_string())
            }
        };

        if solution.is_feasible() {
            let quality = verify_solution(&problem, &solution.variable_values);
            if !quality.is_within(self.tolerance) {
                warn!(
                    constraint_violation = quality.max_constraint_violation,
                    bound_violation = quality.max_bound_violation,
                    integrality_violation = quality.max_integrality_violation,
                    tolerance = self.tolerance,
                    "solution violates the model beyond tolerance"
                );
            }
            solution.quality = quality;
        }

        info!(
            status = %solution.status,
            solve_time_ms = solution.statistics.solve_time_ms,
            "diet model solved"
        );
        Ok(DietPlan { problem, solution })
    }

    /// Solve, and if the model is neither optimal nor feasible, drop bounds
    /// last-first (re-solving after each) until an optimal plan appears.
    ///
    /// Dropped bounds are removed from `constraints` and listed in the
    /// outcome. Fails with `RelaxationExhausted` once the table is empty,
    /// whatever the last solve returned: a plan with no nutrient bounds
    /// left is not a diet.
    pub fn solve_with_relaxation(
        &self,
        foods: &FoodTable,
        constraints: &mut ConstraintTable,
    ) -> Result<DietOutcome> {
        let mut plan = self.solve(foods, constraints)?;
        let mut removed = Vec::new();

        if plan.solution.is_feasible() {
            return Ok(DietOutcome { plan, removed });
        }

        info!("no feasible diet, relaxing nutrient constraints");
        while !plan.solution.is_optimal() {
            let Some(bound) = constraints.pop() else {
                return Err(DietError::RelaxationExhausted {
                    removed: removed.len(),
                });
            };
            warn!(constraint = %bound, "removing constraint");
            removed.push(bound);
            plan = self.solve(foods, constraints)?;
            if constraints.is_empty() {
                return Err(DietError::RelaxationExhausted {
                    removed: removed.len(),
                });
            }
        }

        Ok(DietOutcome { plan, removed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        food::{Food, FoodMetadata},
        models::SolverStatistics,
        solver_service::Result as SolverResult,
    };
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Reports optimal once the model has at most `optimal_at` rows and
    /// records the constraint names it was given on each call
    struct ScriptedSolver {
        optimal_at: Option<usize>,
        first_status: SolutionStatus,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedSolver {
        fn new(optimal_at: Option<usize>) -> Self {
            Self {
                optimal_at,
                first_status: SolutionStatus::Infeasible,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SolverService for ScriptedSolver {
        fn solve(&self, problem: &OptimizationProblem) -> SolverResult<Solution> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(problem.constraints.iter().map(|c| c.name.clone()).collect());

            let values = vec![0.5; problem.num_variables()];
            if calls.len() == 1 {
                match self.first_status {
                    SolutionStatus::Feasible => {
                        let mut solution = Solution::new(SolutionStatus::Feasible, "feasible");
                        solution.variable_values = values;
                        return Ok(solution);
                    }
                    SolutionStatus::Error => {
                        return Err(SolverError::ExecutionFailed(
                            "status: ReachedTimeLimit".to_string(),
                        ))
                    }
                    _ => {}
                }
            }
            match self.optimal_at {
                Some(limit) if problem.constraints.len() <= limit => {
                    let value = problem.objective.value_at(&values);
                    Ok(Solution::optimal(value, values)
                        .with_statistics(SolverStatistics::default()))
                }
                _ => Ok(Solution::new(SolutionStatus::Infeasible, "infeasible")),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }

        fn supports_mip(&self) -> bool {
            true
        }
    }

    fn foods() -> FoodTable {
        let mut table = FoodTable::new();
        table.add_column("Iron_(mg)");
        table.add_column("Zinc_(mg)");
        let rows = [("RICE", 7.0, false), ("EGG", 6.0, true), ("TOFU", 8.0, false)];
        for (name, protein, discrete) in rows {
            let nutrients: HashMap<String, f64> = [("Protein_(g)".to_string(), protein)].into();
            table.insert(Food::new(
                name,
                name,
                nutrients,
                FoodMetadata {
                    is_discrete: discrete,
                    max_amount_gr: 300.0,
                    ..FoodMetadata::default()
                },
            ));
        }
        table
    }

    fn bounds() -> ConstraintTable {
        ConstraintTable::new()
            .with("Protein_(g)", 10.0, 100.0)
            .with("Iron_(mg)", 8.0, 45.0)
            .with("Zinc_(mg)", 11.0, 40.0)
    }

    #[test]
    fn optimal_first_solve_keeps_every_constraint() {
        let solver = Arc::new(ScriptedSolver::new(Some(3)));
        let planner = DietPlanner::new(solver.clone(), SolverConfig::default());
        let mut constraints = bounds();

        let outcome = planner.solve_with_relaxation(&foods(), &mut constraints).unwrap();
        assert!(!outcome.was_relaxed());
        assert_eq!(constraints.len(), 3);
        assert_eq!(solver.calls().len(), 1);
    }

    #[test]
    fn relaxation_removes_last_constraint_first() {
        let solver = Arc::new(ScriptedSolver::new(Some(1)));
        let planner = DietPlanner::new(solver.clone(), SolverConfig::default());
        let mut constraints = bounds();

        let outcome = planner.solve_with_relaxation(&foods(), &mut constraints).unwrap();

        let removed: Vec<_> = outcome.removed.iter().map(|b| b.nutrient.as_str()).collect();
        assert_eq!(removed, ["Zinc_(mg)", "Iron_(mg)"]);
        assert!(outcome.plan.solution.is_optimal());
        assert_eq!(constraints.len(), 1);
        assert!(constraints.contains("Protein_(g)"));
        assert_eq!(
            solver.calls(),
            vec![
                vec!["Protein_(g)", "Iron_(mg)", "Zinc_(mg)"],
                vec!["Protein_(g)", "Iron_(mg)"],
                vec!["Protein_(g)"],
            ]
        );
    }

    #[test]
    fn emptying_the_table_fails_even_if_the_last_solve_is_optimal() {
        let solver = Arc::new(ScriptedSolver::new(Some(0)));
        let planner = DietPlanner::new(solver.clone(), SolverConfig::default());
        let mut constraints = bounds();

        let err = planner
            .solve_with_relaxation(&foods(), &mut constraints)
            .unwrap_err();
        assert!(matches!(err, DietError::RelaxationExhausted { removed: 3 }));
        assert!(constraints.is_empty());
        assert_eq!(solver.calls().len(), 4);
    }

    #[test]
    fn unsolved_model_is_relaxed_like_an_infeasible_one() {
        let solver = Arc::new(ScriptedSolver {
            first_status: SolutionStatus::Error,
            ..ScriptedSolver::new(Some(3))
        });
        let planner = DietPlanner::new(solver.clone(), SolverConfig::default());
        let mut constraints = bounds();

        let outcome = planner.solve_with_relaxation(&foods(), &mut constraints).unwrap();
        let removed: Vec<_> = outcome.removed.iter().map(|b| b.nutrient.as_str()).collect();
        assert_eq!(removed, ["Zinc_(mg)"]);
        assert!(outcome.plan.solution.is_optimal());
        assert_eq!(solver.calls().len(), 2);
    }

    #[test]
    fn solver_failure_becomes_an_error_status() {
        let solver = Arc::new(ScriptedSolver {
            first_status: SolutionStatus::Error,
            ..ScriptedSolver::new(Some(3))
        });
        let planner = DietPlanner::new(solver, SolverConfig::default());

        let plan = planner.solve(&foods(), &bounds()).unwrap();
        assert_eq!(plan.solution.status, SolutionStatus::Error);
        assert!(plan.solution.message.contains("ReachedTimeLimit"));
        assert!(plan.selected_foods().is_empty());
    }

    #[test]
    fn relaxation_fails_once_constraints_run_out() {
        let solver = Arc::new(ScriptedSolver::new(None));
        let planner = DietPlanner::new(solver.clone(), SolverConfig::default());
        let mut constraints = bounds();

        let err = planner
            .solve_with_relaxation(&foods(), &mut constraints)
            .unwrap_err();
        assert!(matches!(err, DietError::RelaxationExhausted { removed: 3 }));
        assert!(constraints.is_empty());
        assert_eq!(solver.calls().len(), 4);
    }

    #[test]
    fn unknown_nutrient_fails_before_solving() {
        let solver = Arc::new(ScriptedSolver::new(Some(3)));
        let planner = DietPlanner::new(solver.clone(), SolverConfig::default());
        let mut constraints = bounds().with("Unobtainium_(mg)", 1.0, 2.0);

        let err = planner
            .solve_with_relaxation(&foods(), &mut constraints)
            .unwrap_err();
        assert!(matches!(err, DietError::UnknownNutrient(_)));
        assert!(solver.calls().is_empty());
    }

    #[test]
    fn feasible_first_solve_is_not_relaxed() {
        let solver = Arc::new(ScriptedSolver {
            first_status: SolutionStatus::Feasible,
            ..ScriptedSolver::new(None)
        });
        let planner = DietPlanner::new(solver.clone(), SolverConfig::default());
        let mut constraints = bounds();

        let outcome = planner.solve_with_relaxation(&foods(), &mut constraints).unwrap();
        assert_eq!(outcome.plan.solution.status, SolutionStatus::Feasible);
        assert!(!outcome.was_relaxed());
        assert_eq!(constraints.len(), 3);
    }

    #[test]
    fn selected_foods_skip_zeroes_and_sort_descending() {
        let planner = DietPlanner::new(Arc::new(ScriptedSolver::new(Some(3))), SolverConfig::default());
        let mut plan = planner.solve(&foods(), &bounds()).unwrap();
        plan.solution.variable_values = vec![0.8, 1.0, 0.0];

        let selected = plan.selected_foods();
        assert_eq!(
            selected,
            vec![
                SelectedFood {
                    name: "EGG".into(),
                    quantity: 1.0,
                    is_discrete: true
                },
                SelectedFood {
                    name: "RICE".into(),
                    quantity: 0.8,
                    is_discrete: false
                },
            ]
        );
        assert_eq!(selected[1].grams(), 80.0);

        let totals = plan.nutrient_totals();
        assert_eq!(totals[0].nutrient, "Protein_(g)");
        assert!((totals[0].total - (0.8 * 7.0 + 6.0)).abs() < 1e-12);
        assert_eq!(totals[1].total, 0.0);
    }
}
