//! Run configuration, read from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{SolverConfig, DEFAULT_SEED};
use crate::generator::{GenerationError, InstanceGenerator, ProblemConfig};

/// One batch: how many instances of which family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub n_problems: usize,
    #[serde(flatten)]
    pub problem: ProblemConfig,
}

/// Everything a generation run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Seed of the single random stream shared by all batches
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Existing directory the `.bin` files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub solver: SolverConfig,

    /// Batches run in order against the same random stream
    #[serde(default, rename = "batch")]
    pub batches: Vec<BatchConfig>,
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Batch {index}: {source}")]
    Batch {
        index: usize,
        #[source]
        source: GenerationError,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Check every batch's parameter ranges and the solver settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batches.is_empty() {
            return Err(ConfigError::Invalid("no [[batch]] configured".to_string()));
        }

        if let Some(limit) = self.solver.time_limit_secs {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "time_limit_secs must be positive, got {}",
                    limit
                )));
            }
        }

        for (index, batch) in self.batches.iter().enumerate() {
            batch
                .problem
                .validate()
                .map_err(|source| ConfigError::Batch { index, source })?;
        }

        Ok(())
    }

    /// Sample configuration reproducing the reference dataset sizes.
    pub fn example() -> &'static str {
        r#"# mipgen configuration file

seed = 0
output_dir = "data"

[solver]
backend = "highs"        # or "cbc"
time_limit_secs = 5.0
disable_heuristics = true
disable_cuts = true
disable_presolve = true
strong_branching = true
verbose = false

[[batch]]
family = "bin_packing"
n_problems = 15
items = [5, 30]
bins = [3, 9]
bin_capacity = [10.0, 20.0]
item_size = [1.0, 5.0]

[[batch]]
family = "multi_knapsack"
n_problems = 15
items = [100, 300]
knapsacks = [5, 20]
knapsack_capacity = [50.0, 150.0]
item_profit = [10.0, 100.0]
item_weight = [5.0, 50.0]

[[batch]]
family = "set_cover"
n_problems = 15
sets = [100, 300]
elements = [50, 400]
"#
    }
}
