use super::value_objects::{SolutionStatus, SolverBackend, VariableType};

/// Decision variable in an optimization problem
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub variable_type: VariableType,
    pub lower_bound: f64,
    pub upper_bound: Option<f64>,
    pub name: String,
}

impl Variable {
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Continuous,
            lower_bound: 0.0,
            upper_bound: None,
            name: name.into(),
        }
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            variable_type: VariableType::Binary,
            lower_bound: 0.0,
            upper_bound: Some(1.0),
            name: name.into(),
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: Option<f64>) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    pub fn is_integer(&self) -> bool {
        self.variable_type == VariableType::Binary
    }
}

/// Linear objective, always minimized
#[derive(Debug, Clone)]
pub struct ObjectiveFunction {
    pub coefficients: Vec<f64>,
}

impl ObjectiveFunction {
    pub fn minimize(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }

    /// Evaluate the objective at the given point
    pub fn value_at(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(coeff, value)| coeff * value)
            .sum()
    }
}

/// Linear range constraint: `lower_bound <= Σ coefficients[i] * x[i] <= upper_bound`
///
/// Either side may be infinite.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub coefficients: Vec<f64>,
    pub name: String,
}

impl Constraint {
    pub fn range(coefficients: Vec<f64>, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            coefficients,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn num_variables(&self) -> usize {
        self.coefficients.len()
    }

    pub fn activity(&self, values: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(coeff, value)| coeff * value)
            .sum()
    }

    /// How far `activity` lies outside the range (0 when satisfied)
    pub fn violation(&self, values: &[f64]) -> f64 {
        let activity = self.activity(values);
        (self.lower_bound - activity)
            .max(activity - self.upper_bound)
            .max(0.0)
    }
}

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    pub verbose: bool,
}

/// Complete optimization problem
#[derive(Debug, Clone)]
pub struct OptimizationProblem {
    pub name: String,
    pub objective: ObjectiveFunction,
    pub constraints: Vec<Constraint>,
    pub variables: Vec<Variable>,
    pub solver_config: SolverConfig,
}

impl OptimizationProblem {
    pub fn new(objective: ObjectiveFunction) -> Self {
        Self {
            name: String::new(),
            objective,
            constraints: Vec::new(),
            variables: Vec::new(),
            solver_config: SolverConfig::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn add_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_constraints(mut self, constraints: Vec<Constraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_variables(mut self, variables: Vec<Variable>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.solver_config = config;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.objective.num_variables()
    }

    pub fn num_integer_variables(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    pub fn is_mixed_integer(&self) -> bool {
        self.num_integer_variables() > 0
    }

    /// Collect the size figures reported alongside every solve
    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            solve_time_ms: 0.0,
            num_variables: self.num_variables() as u32,
            num_constraints: self.constraints.len() as u32,
            num_binary_vars: self.num_integer_variables() as u32,
        }
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
    pub num_binary_vars: u32,
}

/// Quality metrics for the solution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolutionQuality {
    pub max_constraint_violation: f64,
    pub max_bound_violation: f64,
    pub max_integrality_violation: f64,
}

impl SolutionQuality {
    pub fn is_within(&self, tolerance: f64) -> bool {
        self.max_constraint_violation <= tolerance
            && self.max_bound_violation <= tolerance
            && self.max_integrality_violation <= tolerance
    }
}

/// Solution to an optimization problem
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolutionStatus,
    pub optimal_value: Option<f64>,
    pub variable_values: Vec<f64>,
    pub message: String,
    pub statistics: SolverStatistics,
    pub quality: SolutionQuality,
}

impl Solution {
    pub fn new(status: SolutionStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            optimal_value: None,
            variable_values: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
            quality: SolutionQuality::default(),
        }
    }

    pub fn optimal(value: f64, variable_values: Vec<f64>) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            optimal_value: Some(value),
            variable_values,
            message: "Optimal solution found".to_string(),
            statistics: SolverStatistics::default(),
            quality: SolutionQuality::default(),
        }
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_quality(mut self, quality: SolutionQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    pub fn is_feasible(&self) -> bool {
        matches!(
            self.status,
            SolutionStatus::Optimal | SolutionStatus::Feasible
        )
    }
}

/// Measure how well `values` satisfies the constraints, variable bounds and
/// integrality requirements of `problem`.
pub fn verify_solution(problem: &OptimizationProblem, values: &[f64]) -> SolutionQuality {
    let max_constraint_violation = problem
        .constraints
        .iter()
        .map(|c| c.violation(values))
        .fold(0.0, f64::max);

    let mut max_bound_violation: f64 = 0.0;
    let mut max_integrality_violation: f64 = 0.0;
    for (var, &value) in problem.variables.iter().zip(values) {
        let upper = var.upper_bound.unwrap_or(f64::INFINITY);
        let violation = (var.lower_bound - value).max(value - upper).max(0.0);
        max_bound_violation = max_bound_violation.max(violation);

        if var.is_integer() {
            max_integrality_violation = max_integrality_violation.max((value - value.round()).abs());
        }
    }

    SolutionQuality {
        max_constraint_violation,
        max_bound_violation,
        max_integrality_violation,
    }
}
