// Multiple knapsack, assignment variant
//
// max  sum_{i,j} p_i x_ij        (stored as min of -p_i x_ij)
// s.t. sum_i w_i x_ij <= W_j      for all knapsacks j
//      sum_j x_ij = 1             for all items i
//      x_ij in {0, 1}
//
// Variables: x_ij at index i*k + j. The solved objective is the negated profit.

use serde::{Deserialize, Serialize};

use super::{InstanceGenerator, ParamRange, Result};
use crate::domain::{ConstraintType, Instance, RandomSource};

pub const NAME_PREFIX: &str = "random_MKP_";

/// Item weights never exceed this share of the mean knapsack capacity.
pub const WEIGHT_CAPACITY_RATIO: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiKnapsackConfig {
    pub items: ParamRange<usize>,
    pub knapsacks: ParamRange<usize>,
    pub knapsack_capacity: ParamRange<f64>,
    pub item_profit: ParamRange<f64>,
    pub item_weight: ParamRange<f64>,
}

impl MultiKnapsackConfig {
    /// Weight range clipped to the capacity cap. When the cap falls below the
    /// configured minimum, every item gets the minimum weight.
    fn weight_range(&self, capacities: &[f64]) -> ParamRange<f64> {
        let mean = capacities.iter().sum::<f64>() / capacities.len() as f64;
        let cap = WEIGHT_CAPACITY_RATIO * mean;
        let max = self.item_weight.max.min(cap).max(self.item_weight.min);
        ParamRange::new(self.item_weight.min, max)
    }

    fn build(id: usize, capacities: &[f64], profits: &[f64], weights: &[f64]) -> Instance {
        let n_knapsacks = capacities.len();
        let n_items = profits.len();
        let n_vars = n_items * n_knapsacks;
        let x = |i: usize, j: usize| i * n_knapsacks + j;

        let mut objective = vec![0.0; n_vars];
        for (i, &profit) in profits.iter().enumerate() {
            for j in 0..n_knapsacks {
                objective[x(i, j)] = -profit;
            }
        }

        let mut instance = Instance::binary(format!("{}{}", NAME_PREFIX, id), objective);

        for (j, &capacity) in capacities.iter().enumerate() {
            let mut row = vec![0.0; n_vars];
            for (i, &weight) in weights.iter().enumerate() {
                row[x(i, j)] = weight;
            }
            instance.add_constraint(row, ConstraintType::LessThanOrEqual, capacity);
        }

        for i in 0..n_items {
            let mut row = vec![0.0; n_vars];
            row[x(i, 0)..x(i + 1, 0)].fill(1.0);
            instance.add_constraint(row, ConstraintType::Equal, 1.0);
        }

        instance
    }
}

impl InstanceGenerator for MultiKnapsackConfig {
    fn validate(&self) -> Result<()> {
        self.items.validate_count("items")?;
        self.knapsacks.validate_count("knapsacks")?;
        self.knapsack_capacity.validate_real("knapsack_capacity")?;
        self.item_profit.validate_real("item_profit")?;
        self.item_weight.validate_real("item_weight")
    }

    fn generate(&self, id: usize, rng: &mut RandomSource) -> Result<Instance> {
        self.validate()?;

        let n_knapsacks = self.knapsacks.draw(rng);
        let n_items = self.items.draw(rng);
        let capacities: Vec<f64> = (0..n_knapsacks)
            .map(|_| self.knapsack_capacity.draw(rng))
            .collect();
        let profits: Vec<f64> = (0..n_items).map(|_| self.item_profit.draw(rng)).collect();
        let weight_range = self.weight_range(&capacities);
        let weights: Vec<f64> = (0..n_items).map(|_| weight_range.draw(rng)).collect();

        Ok(Self::build(id, &capacities, &profits, &weights))
    }

    fn family(&self) -> &'static str {
        "multi_knapsack"
    }
}
