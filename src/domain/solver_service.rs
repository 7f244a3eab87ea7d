// Port to the external MILP solver
// Generators and the sampling loop only see this trait; backends live in `crate::solver`

use super::models::{Instance, SolveOutcome};
use super::value_objects::SolveStatus;

/// Hard solver failures. Infeasible and timed-out solves are not errors.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Interface for MILP solver backends
///
/// Implementations receive a binary minimisation problem and report whether
/// it was solved to optimality. Any non-optimal termination is an `Ok`
/// outcome with the matching status.
pub trait SolverService {
    /// Solve an instance without modifying it
    fn solve(&self, instance: &Instance) -> Result<SolveOutcome>;

    /// Check shape invariants and binary bounds without solving
    fn validate(&self, instance: &Instance) -> Result<()> {
        let mut errors = instance.shape_errors();

        if instance.objective.is_empty() {
            errors.push("Objective must have at least one coefficient".to_string());
        }

        for (i, (&lower, &upper)) in instance
            .lower_bound
            .iter()
            .zip(&instance.upper_bound)
            .enumerate()
        {
            if lower != 0.0 || upper != 1.0 {
                errors.push(format!(
                    "Variable {} has bounds [{}, {}] but only binary variables are supported",
                    i, lower, upper
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidProblem(errors.join("; ")))
        }
    }

    /// Solve `instance` and attach the outcome as its solution
    fn label(&self, instance: &mut Instance) -> Result<SolveStatus> {
        let outcome = self.solve(instance)?;
        let status = outcome.status;
        instance.solution = Some(outcome.into_solution());
        Ok(status)
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ConstraintType;

    struct Fixed(SolveStatus);

    impl SolverService for Fixed {
        fn solve(&self, instance: &Instance) -> Result<SolveOutcome> {
            self.validate(instance)?;
            Ok(match self.0 {
                SolveStatus::Optimal => SolveOutcome::optimal(1.0, vec![1.0; instance.n_vars()]),
                status => SolveOutcome::without_solution(status),
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn instance() -> Instance {
        let mut instance = Instance::binary("t", vec![1.0]);
        instance.add_constraint(vec![1.0], ConstraintType::GreaterThanOrEqual, 1.0);
        instance
    }

    #[test]
    fn label_attaches_solution() {
        let mut instance = instance();
        let status = Fixed(SolveStatus::Optimal).label(&mut instance).unwrap();
        assert_eq!(status, SolveStatus::Optimal);
        assert!(instance.is_feasible());
        assert_eq!(instance.solution.unwrap().assignment, vec![1.0]);
    }

    #[test]
    fn label_marks_timeout_infeasible() {
        let mut instance = instance();
        Fixed(SolveStatus::TimeLimit).label(&mut instance).unwrap();
        assert_eq!(instance.solution.as_ref().map(|s| s.feasible), Some(false));
    }

    #[test]
    fn validate_rejects_non_binary_bounds() {
        let mut instance = instance();
        instance.upper_bound[0] = 3.0;
        assert!(matches!(
            Fixed(SolveStatus::Optimal).validate(&instance),
            Err(SolverError::InvalidProblem(_))
        ));
    }
}
