// Set cover
//
// min  sum_j x_j
// s.t. sum_j a_ij x_j >= 1       for all elements i
//      x_j in {0, 1}
//
// a_ij is drawn with probability A_DENSITY, then every empty column (a set
// with no element) gets one random element. Rows are not repaired, so an
// element may stay uncovered and the instance infeasible.

use serde::{Deserialize, Serialize};

use super::{InstanceGenerator, ParamRange, Result};
use crate::domain::{ConstraintType, Instance, RandomSource};

pub const NAME_PREFIX: &str = "random_SC_";

/// Probability that a cell of the coverage matrix starts at 1.
pub const A_DENSITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetCoverConfig {
    pub sets: ParamRange<usize>,
    pub elements: ParamRange<usize>,
}

/// Coverage matrix with `n_elements` rows and `n_sets` columns.
fn coverage_matrix(n_sets: usize, n_elements: usize, rng: &mut RandomSource) -> Vec<Vec<f64>> {
    let mut a: Vec<Vec<f64>> = (0..n_elements)
        .map(|_| {
            (0..n_sets)
                .map(|_| if rng.next_real(0.0, 1.0) < A_DENSITY { 1.0 } else { 0.0 })
                .collect()
        })
        .collect();

    for j in 0..n_sets {
        if a.iter().all(|row| row[j] == 0.0) {
            let i = rng.next_int(0, n_elements - 1);
            a[i][j] = 1.0;
        }
    }

    a
}

impl InstanceGenerator for SetCoverConfig {
    fn validate(&self) -> Result<()> {
        self.sets.validate_count("sets")?;
        self.elements.validate_count("elements")
    }

    fn generate(&self, id: usize, rng: &mut RandomSource) -> Result<Instance> {
        self.validate()?;

        let n_sets = self.sets.draw(rng);
        let n_elements = self.elements.draw(rng);

        let mut instance = Instance::binary(format!("{}{}", NAME_PREFIX, id), vec![1.0; n_sets]);
        for row in coverage_matrix(n_sets, n_elements, rng) {
            instance.add_constraint(row, ConstraintType::GreaterThanOrEqual, 1.0);
        }

        Ok(instance)
    }

    fn family(&self) -> &'static str {
        "set_cover"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_set_covers_an_element() {
        let config = SetCoverConfig {
            sets: ParamRange::new(5, 40),
            elements: ParamRange::new(1, 6),
        };
        let mut rng = RandomSource::new(5);
        for id in 0..50 {
            let instance = config.generate(id, &mut rng).unwrap();
            assert!(instance.shape_errors().is_empty());
            for j in 0..instance.n_vars() {
                assert!(instance.matrix.iter().any(|row| row[j] == 1.0));
            }
        }
    }

    #[test]
    fn rows_are_cover_constraints() {
        let config = SetCoverConfig {
            sets: ParamRange::new(4, 4),
            elements: ParamRange::new(7, 7),
        };
        let instance = config.generate(2, &mut RandomSource::default()).unwrap();
        assert_eq!(instance.name, "random_SC_2");
        assert_eq!(instance.objective, vec![1.0; 4]);
        assert_eq!(instance.n_constraints(), 7);
        assert!(instance
            .constraint_types
            .iter()
            .all(|&t| t == ConstraintType::GreaterThanOrEqual));
        assert_eq!(instance.rhs, vec![1.0; 7]);
        assert!(instance
            .matrix
            .iter()
            .flatten()
            .all(|&a| a == 0.0 || a == 1.0));
    }

    #[test]
    fn single_cell_is_repaired_to_one() {
        let config = SetCoverConfig {
            sets: ParamRange::new(1, 1),
            elements: ParamRange::new(1, 1),
        };
        let mut rng = RandomSource::new(0);
        for id in 0..10 {
            let instance = config.generate(id, &mut rng).unwrap();
            assert_eq!(instance.matrix, vec![vec![1.0]]);
        }
    }

    #[test]
    fn density_is_roughly_respected() {
        let mut rng = RandomSource::new(1);
        let a = coverage_matrix(100, 100, &mut rng);
        let ones = a.iter().flatten().filter(|&&v| v == 1.0).count() as f64;
        let share = ones / 10_000.0;
        assert!((share - A_DENSITY).abs() < 0.05, "share = {}", share);
    }
}
