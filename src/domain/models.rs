use serde::{Deserialize, Serialize};

use super::value_objects::{ConstraintType, SolveStatus, SolverBackend};

/// Solve outcome attached to an instance.
///
/// Only proven optimal solves carry an assignment; any other outcome is kept
/// as `feasible == false` with an empty assignment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution {
    pub objective_value: f64,
    pub feasible: bool,
    pub assignment: Vec<f64>,
}

impl Solution {
    pub fn optimal(objective_value: f64, assignment: Vec<f64>) -> Self {
        Self {
            objective_value,
            feasible: true,
            assignment,
        }
    }

    pub fn not_feasible() -> Self {
        Self::default()
    }
}

/// What a solver backend reports back for one instance
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    pub objective_value: f64,
    pub assignment: Vec<f64>,
}

impl SolveOutcome {
    pub fn optimal(objective_value: f64, assignment: Vec<f64>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            objective_value,
            assignment,
        }
    }

    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: 0.0,
            assignment: Vec::new(),
        }
    }

    /// Collapse the outcome to the persisted form. A timed-out solve is
    /// rejected even if the backend held an incumbent.
    pub fn into_solution(self) -> Solution {
        if self.status.is_feasible() {
            Solution::optimal(self.objective_value, self.assignment)
        } else {
            Solution::not_feasible()
        }
    }
}

/// Configuration handed to solver adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    /// Wall-clock limit per solve, in seconds
    pub time_limit_secs: Option<f64>,
    pub disable_heuristics: bool,
    pub disable_cuts: bool,
    pub disable_presolve: bool,
    pub strong_branching: bool,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            backend: SolverBackend::Highs,
            time_limit_secs: Some(5.0),
            disable_heuristics: true,
            disable_cuts: true,
            disable_presolve: true,
            strong_branching: true,
            verbose: false,
        }
    }
}

/// A binary MILP in minimisation form, optionally labelled with a solve outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub name: String,
    pub constraint_types: Vec<ConstraintType>,
    pub objective: Vec<f64>,
    pub matrix: Vec<Vec<f64>>,
    pub rhs: Vec<f64>,
    pub lower_bound: Vec<f64>,
    pub upper_bound: Vec<f64>,
    pub solution: Option<Solution>,
}

impl Instance {
    /// Create an unsolved instance with all variables bounded to `[0, 1]`.
    pub fn binary(name: impl Into<String>, objective: Vec<f64>) -> Self {
        let n_vars = objective.len();
        Self {
            name: name.into(),
            constraint_types: Vec::new(),
            objective,
            matrix: Vec::new(),
            rhs: Vec::new(),
            lower_bound: vec![0.0; n_vars],
            upper_bound: vec![1.0; n_vars],
            solution: None,
        }
    }

    pub fn add_constraint(&mut self, row: Vec<f64>, constraint_type: ConstraintType, rhs: f64) {
        self.matrix.push(row);
        self.constraint_types.push(constraint_type);
        self.rhs.push(rhs);
    }

    pub fn n_vars(&self) -> usize {
        self.objective.len()
    }

    pub fn n_constraints(&self) -> usize {
        self.constraint_types.len()
    }

    pub fn is_feasible(&self) -> bool {
        self.solution.as_ref().is_some_and(|s| s.feasible)
    }

    /// Describe every violated shape invariant; empty when well formed.
    pub fn shape_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let n_vars = self.n_vars();

        if self.lower_bound.len() != n_vars || self.upper_bound.len() != n_vars {
            errors.push(format!(
                "Bounds have {}/{} entries but instance has {} variables",
                self.lower_bound.len(),
                self.upper_bound.len(),
                n_vars
            ));
        }

        let n_rows = self.constraint_types.len();
        if self.rhs.len() != n_rows || self.matrix.len() != n_rows {
            errors.push(format!(
                "Constraint count mismatch: {} types, {} rows, {} right-hand sides",
                n_rows,
                self.matrix.len(),
                self.rhs.len()
            ));
        }

        for (i, row) in self.matrix.iter().enumerate() {
            if row.len() != n_vars {
                errors.push(format!(
                    "Row {} has {} coefficients but instance has {} variables",
                    i,
                    row.len(),
                    n_vars
                ));
            }
        }

        if let Some(solution) = &self.solution {
            if solution.feasible && solution.assignment.len() != n_vars {
                errors.push(format!(
                    "Assignment has {} values but instance has {} variables",
                    solution.assignment.len(),
                    n_vars
                ));
            }
        }

        errors
    }

    /// Objective value of `assignment`.
    pub fn evaluate(&self, assignment: &[f64]) -> f64 {
        self.objective
            .iter()
            .zip(assignment)
            .map(|(c, x)| c * x)
            .sum()
    }

    /// Largest amount by which `assignment` misses any constraint row.
    pub fn max_constraint_violation(&self, assignment: &[f64]) -> f64 {
        self.matrix
            .iter()
            .zip(&self.constraint_types)
            .zip(&self.rhs)
            .map(|((row, sense), &rhs)| {
                let lhs: f64 = row.iter().zip(assignment).map(|(a, x)| a * x).sum();
                sense.violation(lhs, rhs)
            })
            .fold(0.0, f64::max)
    }
}
