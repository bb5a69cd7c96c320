use crate::domain::{
    solver_service::{Result, SolverError, SolverService},
    value_objects::SolverBackend,
};
#[cfg(feature = "cbc")]
use crate::solver::CoinCbcSolver;
#[cfg(feature = "highs")]
use crate::solver::HighsSolver;
#[cfg(feature = "microlp")]
use crate::solver::MicroLpSolver;
use std::sync::Arc;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend, failing when it was not compiled in
    pub fn create_from_backend(backend: SolverBackend) -> Result<Arc<dyn SolverService>> {
        match backend {
            SolverBackend::Auto => Self::default_solver(),
            #[cfg(feature = "cbc")]
            SolverBackend::CoinCbc => Ok(Arc::new(CoinCbcSolver::new())),
            #[cfg(feature = "highs")]
            SolverBackend::Highs => Ok(Arc::new(HighsSolver::new())),
            #[cfg(feature = "microlp")]
            SolverBackend::MicroLp => Ok(Arc::new(MicroLpSolver::new())),
            #[allow(unreachable_patterns)]
            other => Err(SolverError::SolverNotAvailable(format!(
                "{other} support was not compiled into this build"
            ))),
        }
    }

    /// The strongest compiled-in backend: HiGHS, then CBC, then microlp
    pub fn default_solver() -> Result<Arc<dyn SolverService>> {
        Self::available_backends()
            .into_iter()
            .next()
            .ok_or_else(|| {
                SolverError::SolverNotAvailable(
                    "no solver backend was compiled into this build".to_string(),
                )
            })
            .and_then(Self::create_from_backend)
    }

    /// Backends compiled into this build, strongest first
    pub fn available_backends() -> Vec<SolverBackend> {
        let mut backends = Vec::new();
        if cfg!(feature = "highs") {
            backends.push(SolverBackend::Highs);
        }
        if cfg!(feature = "cbc") {
            backends.push(SolverBackend::CoinCbc);
        }
        if cfg!(feature = "microlp") {
            backends.push(SolverBackend::MicroLp);
        }
        backends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_picks_an_available_backend() {
        let available = SolverFactory::available_backends();
        match SolverFactory::create_from_backend(SolverBackend::Auto) {
            Ok(solver) => {
                assert!(!available.is_empty());
                assert_eq!(solver.name(), available[0].to_string());
            }
            Err(SolverError::SolverNotAvailable(_)) => assert!(available.is_empty()),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(not(feature = "cbc"))]
    #[test]
    fn missing_backend_is_reported() {
        let err = SolverFactory::create_from_backend(SolverBackend::CoinCbc).err();
        assert!(matches!(err, Some(SolverError::SolverNotAvailable(_))));
    }
}
