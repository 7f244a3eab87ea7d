// Bin packing
//
// min  sum_j y_j
// s.t. sum_{i,j} x_ij >= 1
//      sum_i s_i x_ij - B y_j <= 0     for all bins j
//      sum_j x_ij = 1                   for all items i
//      y_j, x_ij in {0, 1}
//
// Variables: y_0..y_{m-1}, then x_ij at index m + i*m + j.

use serde::{Deserialize, Serialize};

use super::{InstanceGenerator, ParamRange, Result};
use crate::domain::{ConstraintType, Instance, RandomSource};

pub const NAME_PREFIX: &str = "randomBP_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinPackingConfig {
    pub items: ParamRange<usize>,
    pub bins: ParamRange<usize>,
    pub bin_capacity: ParamRange<f64>,
    pub item_size: ParamRange<f64>,
}

impl BinPackingConfig {
    fn build(id: usize, n_bins: usize, bin_capacity: f64, item_sizes: &[f64]) -> Instance {
        let n_items = item_sizes.len();
        let n_vars = n_bins + n_items * n_bins;
        let x = |i: usize, j: usize| n_bins + i * n_bins + j;

        let mut objective = vec![0.0; n_vars];
        objective[..n_bins].fill(1.0);

        let mut instance = Instance::binary(format!("{}{}", NAME_PREFIX, id), objective);

        // at least one assignment, rules out the all-zero solution
        let mut any_assigned = vec![0.0; n_vars];
        any_assigned[n_bins..].fill(1.0);
        instance.add_constraint(any_assigned, ConstraintType::GreaterThanOrEqual, 1.0);

        for j in 0..n_bins {
            let mut row = vec![0.0; n_vars];
            row[j] = -bin_capacity;
            for (i, &size) in item_sizes.iter().enumerate() {
                row[x(i, j)] = size;
            }
            instance.add_constraint(row, ConstraintType::LessThanOrEqual, 0.0);
        }

        for i in 0..n_items {
            let mut row = vec![0.0; n_vars];
            for j in 0..n_bins {
                row[x(i, j)] = 1.0;
            }
            instance.add_constraint(row, ConstraintType::Equal, 1.0);
        }

        instance
    }
}

impl InstanceGenerator for BinPackingConfig {
    fn validate(&self) -> Result<()> {
        self.items.validate_count("items")?;
        self.bins.validate_count("bins")?;
        self.bin_capacity.validate_real("bin_capacity")?;
        self.item_size.validate_real("item_size")
    }

    fn generate(&self, id: usize, rng: &mut RandomSource) -> Result<Instance> {
        self.validate()?;

        let n_items = self.items.draw(rng);
        let n_bins = self.bins.draw(rng);
        let bin_capacity = self.bin_capacity.draw(rng);
        let item_sizes: Vec<f64> = (0..n_items).map(|_| self.item_size.draw(rng)).collect();

        Ok(Self::build(id, n_bins, bin_capacity, &item_sizes))
    }

    fn family(&self) -> &'static str {
        "bin_packing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerationError;

    fn fixed_config() -> BinPackingConfig {
        BinPackingConfig {
            items: ParamRange::new(3, 3),
            bins: ParamRange::new(2, 2),
            bin_capacity: ParamRange::new(10.0, 10.0),
            item_size: ParamRange::new(4.0, 4.0),
        }
    }

    #[test]
    fn layout_of_small_instance() {
        let instance = fixed_config()
            .generate(0, &mut RandomSource::default())
            .unwrap();

        assert_eq!(instance.name, "randomBP_0");
        assert_eq!(instance.n_vars(), 2 + 6);
        assert_eq!(instance.n_constraints(), 1 + 2 + 3);
        assert!(instance.shape_errors().is_empty());
        assert_eq!(instance.objective, vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);

        use ConstraintType::*;
        assert_eq!(
            instance.constraint_types,
            vec![
                GreaterThanOrEqual,
                LessThanOrEqual,
                LessThanOrEqual,
                Equal,
                Equal,
                Equal
            ]
        );
        assert_eq!(instance.rhs, vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

        // bin 1 capacity row: -B y_1 + 4 x_01 + 4 x_11 + 4 x_21
        assert_eq!(
            instance.matrix[2],
            vec![0.0, -10.0, 0.0, 4.0, 0.0, 4.0, 0.0, 4.0]
        );
        // item 2 assignment row
        assert_eq!(
            instance.matrix[5],
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0]
        );
    }

    #[test]
    fn item_rows_have_one_unit_per_bin() {
        let config = BinPackingConfig {
            items: ParamRange::new(4, 9),
            bins: ParamRange::new(2, 5),
            bin_capacity: ParamRange::new(10.0, 20.0),
            item_size: ParamRange::new(1.0, 5.0),
        };
        let mut rng = RandomSource::new(7);
        for id in 0..20 {
            let instance = config.generate(id, &mut rng).unwrap();
            let n_bins = instance.objective.iter().filter(|&&c| c == 1.0).count();
            let n_items = (instance.n_vars() - n_bins) / n_bins;
            assert_eq!(instance.n_constraints(), 1 + n_bins + n_items);

            for row in &instance.matrix[1 + n_bins..] {
                assert_eq!(row.iter().filter(|&&a| a != 0.0).count(), n_bins);
                assert!(row.iter().all(|&a| a == 0.0 || a == 1.0));
            }
            assert!(instance.rhs[1 + n_bins..].iter().all(|&b| b == 1.0));
        }
    }

    #[test]
    fn capacity_is_shared_across_bins() {
        let config = BinPackingConfig {
            bin_capacity: ParamRange::new(10.0, 20.0),
            ..fixed_config()
        };
        let instance = config.generate(0, &mut RandomSource::new(3)).unwrap();
        let capacity = -instance.matrix[1][0];
        assert!((10.0..20.0).contains(&capacity));
        assert_eq!(instance.matrix[2][1], -capacity);
    }

    #[test]
    fn rejects_inverted_range_before_drawing() {
        let config = BinPackingConfig {
            bins: ParamRange::new(4, 2),
            ..fixed_config()
        };
        let mut rng = RandomSource::new(1);
        let untouched = rng.clone().next_int(0, 1_000_000);
        assert!(matches!(
            config.generate(0, &mut rng),
            Err(GenerationError::InvalidRange { name: "bins", .. })
        ));
        assert_eq!(rng.next_int(0, 1_000_000), untouched);
    }
}
