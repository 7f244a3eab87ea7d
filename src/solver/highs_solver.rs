// HiGHS adapter
// Translates a binary instance into a HiGHS row problem and maps the model status back

use std::time::Instant;

use highs::{HighsModelStatus, RowProblem, Sense};
use log::debug;

use crate::domain::{
    models::{Instance, SolveOutcome, SolverConfig},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{ConstraintType, SolveStatus},
};

pub struct HighsSolver {
    config: SolverConfig,
}

impl HighsSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Map a model status onto the solve policy: only `Optimal` reads the columns.
    fn outcome(
        instance: &Instance,
        status: HighsModelStatus,
        columns: impl FnOnce() -> Vec<f64>,
    ) -> Result<SolveOutcome> {
        match status {
            HighsModelStatus::Optimal => {
                let assignment = columns();
                let objective_value = instance.evaluate(&assignment);
                Ok(SolveOutcome::optimal(objective_value, assignment))
            }
            HighsModelStatus::Infeasible => {
                Ok(SolveOutcome::without_solution(SolveStatus::Infeasible))
            }
            HighsModelStatus::ReachedTimeLimit => {
                Ok(SolveOutcome::without_solution(SolveStatus::TimeLimit))
            }
            status @ (HighsModelStatus::LoadError
            | HighsModelStatus::ModelError
            | HighsModelStatus::PresolveError
            | HighsModelStatus::SolveError
            | HighsModelStatus::PostsolveError) => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
            _ => Ok(SolveOutcome::without_solution(SolveStatus::NotSolved)),
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl SolverService for HighsSolver {
    fn solve(&self, instance: &Instance) -> Result<SolveOutcome> {
        self.validate(instance)?;

        let start_time = Instant::now();
        let mut pb = RowProblem::default();

        let columns: Vec<_> = instance
            .objective
            .iter()
            .zip(instance.lower_bound.iter().zip(&instance.upper_bound))
            .map(|(&cost, (&lower, &upper))| pb.add_integer_column(cost, lower..=upper))
            .collect();

        for ((row, &sense), &rhs) in instance
            .matrix
            .iter()
            .zip(&instance.constraint_types)
            .zip(&instance.rhs)
        {
            let terms: Vec<_> = row
                .iter()
                .zip(&columns)
                .filter(|(coeff, _)| **coeff != 0.0)
                .map(|(&coeff, &col)| (col, coeff))
                .collect();

            match sense {
                ConstraintType::LessThanOrEqual => {
                    pb.add_row(..=rhs, &terms);
                }
                ConstraintType::Equal => {
                    pb.add_row(rhs..=rhs, &terms);
                }
                ConstraintType::GreaterThanOrEqual => {
                    pb.add_row(rhs.., &terms);
                }
            }
        }

        let mut model = pb.optimise(Sense::Minimise);
        if !self.config.verbose {
            model.make_quiet();
        }
        if let Some(limit) = self.config.time_limit_secs {
            model.set_option("time_limit", limit);
        }
        if self.config.disable_presolve {
            model.set_option("presolve", "off");
        }
        if self.config.disable_heuristics {
            model.set_option("mip_heuristic_effort", 0.0);
        }
        // HiGHS exposes no switch for cut families or strong branching

        let solved = model.solve();
        debug!(
            "HiGHS finished {} in {:.1} ms with {:?}",
            instance.name,
            start_time.elapsed().as_secs_f64() * 1000.0,
            solved.status()
        );

        Self::outcome(instance, solved.status(), || {
            solved.get_solution().columns().to_vec()
        })
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_item() -> Instance {
        let mut instance = Instance::binary("single", vec![-2.0]);
        instance.add_constraint(vec![1.0], ConstraintType::LessThanOrEqual, 1.0);
        instance
    }

    #[test]
    fn optimal_status_reads_columns() {
        let outcome =
            HighsSolver::outcome(&single_item(), HighsModelStatus::Optimal, || vec![1.0]).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.objective_value, -2.0);
        assert_eq!(outcome.assignment, vec![1.0]);
    }

    #[test]
    fn other_statuses_are_never_optimal() {
        let cases = [
            (HighsModelStatus::Infeasible, SolveStatus::Infeasible),
            (HighsModelStatus::ReachedTimeLimit, SolveStatus::TimeLimit),
            (HighsModelStatus::ReachedIterationLimit, SolveStatus::NotSolved),
            (HighsModelStatus::UnboundedOrInfeasible, SolveStatus::NotSolved),
            (HighsModelStatus::ObjectiveBound, SolveStatus::NotSolved),
            (HighsModelStatus::Unknown, SolveStatus::NotSolved),
        ];
        for (status, expected) in cases {
            let outcome = HighsSolver::outcome(&single_item(), status, || {
                panic!("columns read for {:?}", status)
            })
            .unwrap();
            assert_eq!(outcome.status, expected);
            assert!(!outcome.into_solution().feasible);
        }
    }

    #[test]
    fn error_statuses_fail_the_solve() {
        for status in [HighsModelStatus::ModelError, HighsModelStatus::SolveError] {
            assert!(matches!(
                HighsSolver::outcome(&single_item(), status, Vec::new),
                Err(SolverError::ExecutionFailed(_))
            ));
        }
    }
}
