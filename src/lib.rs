// Domain layer: MILP model, solver port, randomness
pub mod domain;

// Problem-family generators
pub mod generator;

// Application layer: retry-until-feasible batch sampling
pub mod application;

// Infrastructure layer: dataset files and run configuration
pub mod infrastructure;

// Solver adapters: concrete implementations of SolverService
#[cfg(feature = "solvers")]
pub mod solver;

// Re-export commonly used types
pub use domain::{
    ConstraintType, Instance, RandomSource, Solution, SolveOutcome, SolveStatus, SolverBackend,
    SolverConfig, SolverError, SolverService,
};

pub use generator::{
    BinPackingConfig, GenerationError, InstanceGenerator, MultiKnapsackConfig, ParamRange,
    ProblemConfig, SetCoverConfig,
};

pub use application::{BatchReport, SamplingError, SamplingLoop};

pub use infrastructure::{read_instance, BinaryExporter, ConfigError, RunConfig};

#[cfg(feature = "solvers")]
pub use solver::{CoinCbcSolver, HighsSolver, SolverFactory};
