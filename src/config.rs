// Command-line and environment configuration for a diet run

use std::path::PathBuf;

use clap::Parser;

use crate::application::diet_service::DEFAULT_TOLERANCE;
use crate::domain::{models::SolverConfig, value_objects::SolverBackend};
use crate::infrastructure::FoodSources;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "stigler-diet",
    version,
    about = "Find the diet with the lowest glycemic load that meets daily nutrient ranges"
)]
pub struct Config {
    /// USDA nutrient database (ABBREV.csv)
    #[arg(long, env = "STIGLER_DB_PATH", default_value = "ABBREV.csv")]
    pub db_path: PathBuf,

    /// Extra foods not present in the USDA database
    #[arg(long, env = "STIGLER_CUSTOM_DB_PATH", default_value = "custom_foods.csv")]
    pub custom_db_path: PathBuf,

    /// Per-food glycemic index, discreteness and gram range
    #[arg(long, env = "STIGLER_EXTRA_INFO_PATH", default_value = "extra_info.csv")]
    pub extra_info_path: PathBuf,

    /// Nutrient bounds as `nutrient,min,max`; the built-in daily table when omitted
    #[arg(long, env = "STIGLER_CONSTRAINTS_PATH")]
    pub constraints_path: Option<PathBuf>,

    /// Solver backend: auto, cbc, highs or microlp
    #[arg(long, env = "STIGLER_SOLVER", default_value = "auto")]
    pub solver: SolverBackend,

    /// Tolerance for the post-solve feasibility check
    #[arg(long, env = "STIGLER_TOLERANCE", default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Report the unsolved model instead of dropping constraints
    #[arg(long)]
    pub no_relax: bool,

    /// Debug logging and solver output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Config {
    pub fn food_sources(&self) -> FoodSources {
        FoodSources::new(&self.db_path, &self.custom_db_path, &self.extra_info_path)
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            backend: self.solver,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_usda_layout() {
        let config = Config::try_parse_from(["stigler-diet"]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("ABBREV.csv"));
        assert_eq!(config.custom_db_path, PathBuf::from("custom_foods.csv"));
        assert_eq!(config.extra_info_path, PathBuf::from("extra_info.csv"));
        assert_eq!(config.constraints_path, None);
        assert_eq!(config.solver, SolverBackend::Auto);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert!(!config.no_relax);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "stigler-diet",
            "--db-path",
            "data/ABBREV.csv",
            "--constraints-path",
            "data/constraints.csv",
            "--solver",
            "microlp",
            "--no-relax",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.food_sources().db_path, PathBuf::from("data/ABBREV.csv"));
        assert_eq!(config.constraints_path, Some(PathBuf::from("data/constraints.csv")));
        assert_eq!(config.solver_config().backend, SolverBackend::MicroLp);
        assert!(config.solver_config().verbose);
        assert!(config.no_relax);
    }

    #[test]
    fn rejects_unknown_solver() {
        assert!(Config::try_parse_from(["stigler-diet", "--solver", "glop"]).is_err());
    }
}
