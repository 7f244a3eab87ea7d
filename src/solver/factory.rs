use crate::domain::{SolverBackend, SolverConfig, SolverService};
use crate::solver::{CoinCbcSolver, HighsSolver};

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create the backend named in `config`, configured with it
    pub fn create(config: &SolverConfig) -> Box<dyn SolverService> {
        match config.backend {
            SolverBackend::Highs => Box::new(HighsSolver::new(config.clone())),
            SolverBackend::CoinCbc => Box::new(CoinCbcSolver::new(config.clone())),
        }
    }

    /// Get the default solver (HiGHS)
    pub fn default_solver() -> Box<dyn SolverService> {
        Box::new(HighsSolver::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_follows_backend() {
        let cbc = SolverConfig {
            backend: SolverBackend::CoinCbc,
            ..SolverConfig::default()
        };
        assert_eq!(SolverFactory::create(&cbc).name(), CoinCbcSolver::default().name());
        assert_eq!(
            SolverFactory::create(&SolverConfig::default()).name(),
            SolverFactory::default_solver().name()
        );
    }
}
