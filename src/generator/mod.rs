//! Random instance generators.
//!
//! Each problem family turns a handful of parameter ranges into one binary
//! MILP. Generators validate their ranges before the first draw, so a bad
//! configuration fails fast without touching the random stream or a solver.

pub mod bin_packing;
pub mod multi_knapsack;
pub mod set_cover;

pub use bin_packing::BinPackingConfig;
pub use multi_knapsack::MultiKnapsackConfig;
pub use set_cover::SetCoverConfig;

use serde::{Deserialize, Serialize};

use crate::domain::{Instance, RandomSource};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid range for {name}: max ({max}) < min ({min})")]
    InvalidRange {
        name: &'static str,
        min: String,
        max: String,
    },

    #[error("Range for {name} must start at 1 or more, got {min}")]
    EmptyCount { name: &'static str, min: usize },

    #[error("Range for {name} must be finite")]
    NonFinite { name: &'static str },
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// Closed interval of generation parameters, written `[min, max]` in config files
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(T, T)", into = "(T, T)")]
pub struct ParamRange<T: Copy> {
    pub min: T,
    pub max: T,
}

impl<T: Copy> ParamRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: Copy> From<(T, T)> for ParamRange<T> {
    fn from((min, max): (T, T)) -> Self {
        Self { min, max }
    }
}

impl<T: Copy> From<ParamRange<T>> for (T, T) {
    fn from(range: ParamRange<T>) -> Self {
        (range.min, range.max)
    }
}

impl ParamRange<usize> {
    /// Counts must be non-empty and ordered.
    pub fn validate_count(&self, name: &'static str) -> Result<()> {
        if self.max < self.min {
            return Err(GenerationError::InvalidRange {
                name,
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        if self.min == 0 {
            return Err(GenerationError::EmptyCount { name, min: self.min });
        }
        Ok(())
    }

    pub fn draw(&self, rng: &mut RandomSource) -> usize {
        rng.next_int(self.min, self.max)
    }
}

impl ParamRange<f64> {
    pub fn validate_real(&self, name: &'static str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(GenerationError::NonFinite { name });
        }
        if self.max < self.min {
            return Err(GenerationError::InvalidRange {
                name,
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        Ok(())
    }

    pub fn draw(&self, rng: &mut RandomSource) -> f64 {
        rng.next_real(self.min, self.max)
    }
}

/// Builds one unsolved instance per call
pub trait InstanceGenerator {
    /// Check every parameter range
    fn validate(&self) -> Result<()>;

    /// Draw a new instance named after `id`
    fn generate(&self, id: usize, rng: &mut RandomSource) -> Result<Instance>;

    /// Short family name used in logs
    fn family(&self) -> &'static str;
}

/// Parameters of one problem family, tagged by `family` in config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ProblemConfig {
    BinPacking(BinPackingConfig),
    MultiKnapsack(MultiKnapsackConfig),
    SetCover(SetCoverConfig),
}

impl InstanceGenerator for ProblemConfig {
    fn validate(&self) -> Result<()> {
        match self {
            ProblemConfig::BinPacking(config) => config.validate(),
            ProblemConfig::MultiKnapsack(config) => config.validate(),
            ProblemConfig::SetCover(config) => config.validate(),
        }
    }

    fn generate(&self, id: usize, rng: &mut RandomSource) -> Result<Instance> {
        match self {
            ProblemConfig::BinPacking(config) => config.generate(id, rng),
            ProblemConfig::MultiKnapsack(config) => config.generate(id, rng),
            ProblemConfig::SetCover(config) => config.generate(id, rng),
        }
    }

    fn family(&self) -> &'static str {
        match self {
            ProblemConfig::BinPacking(config) => config.family(),
            ProblemConfig::MultiKnapsack(config) => config.family(),
            ProblemConfig::SetCover(config) => config.family(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_range_validation() {
        assert!(ParamRange::new(1usize, 1).validate_count("items").is_ok());
        assert_eq!(
            ParamRange::new(5usize, 3).validate_count("items"),
            Err(GenerationError::InvalidRange {
                name: "items",
                min: "5".to_string(),
                max: "3".to_string(),
            })
        );
        assert!(matches!(
            ParamRange::new(0usize, 3).validate_count("bins"),
            Err(GenerationError::EmptyCount { .. })
        ));
    }

    #[test]
    fn real_range_validation() {
        assert!(ParamRange::new(4.0, 4.0).validate_real("size").is_ok());
        assert!(ParamRange::new(4.0, 3.9).validate_real("size").is_err());
        assert_eq!(
            ParamRange::new(f64::NAN, 1.0).validate_real("size"),
            Err(GenerationError::NonFinite { name: "size" })
        );
    }

    #[test]
    fn problem_config_dispatches_to_family() {
        let config = ProblemConfig::SetCover(SetCoverConfig {
            sets: ParamRange::new(2, 2),
            elements: ParamRange::new(3, 3),
        });
        let instance = config.generate(4, &mut RandomSource::default()).unwrap();
        assert_eq!(instance.name, "random_SC_4");
        assert_eq!(config.family(), "set_cover");
    }

    #[test]
    fn problem_config_reads_tagged_toml() {
        let config: ProblemConfig = toml::from_str(
            r#"
            family = "bin_packing"
            items = [3, 5]
            bins = [2, 2]
            bin_capacity = [10.0, 12.0]
            item_size = [1.0, 4.0]
            "#,
        )
        .unwrap();
        match config {
            ProblemConfig::BinPacking(bp) => {
                assert_eq!(bp.items, ParamRange::new(3, 5));
                assert_eq!(bp.item_size, ParamRange::new(1.0, 4.0));
            }
            other => panic!("unexpected family: {:?}", other),
        }
    }
}
