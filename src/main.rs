use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use stigler_diet::{
    application::report, load_constraint_table, load_food_table, logging, Config, ConstraintTable,
    DietOutcome, DietPlanner, SolverFactory,
};
use tracing::info;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(config.verbose);

    let foods = load_food_table(&config.food_sources()).context("loading food tables")?;
    let mut constraints = match &config.constraints_path {
        Some(path) => load_constraint_table(path)
            .with_context(|| format!("loading constraints from {}", path.display()))?,
        None => ConstraintTable::default_daily(),
    };

    let solver = SolverFactory::create_from_backend(config.solver)?;
    info!(solver = solver.name(), foods = foods.len(), "planning diet");

    let planner = DietPlanner::new(solver, config.solver_config()).with_tolerance(config.tolerance);
    let outcome = if config.no_relax {
        DietOutcome {
            plan: planner.solve(&foods, &constraints)?,
            removed: Vec::new(),
        }
    } else {
        planner.solve_with_relaxation(&foods, &mut constraints)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &outcome, &constraints)?;
    out.flush()?;

    Ok(())
}
