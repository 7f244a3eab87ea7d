use mipgen::domain::Result;
use mipgen::{Instance, SolveOutcome, SolveStatus, SolverError, SolverService};

/// Exhaustive 0/1 enumeration, good enough for instances of a few variables
pub struct BruteForceSolver;

pub const MAX_VARS: usize = 20;

impl SolverService for BruteForceSolver {
    fn solve(&self, instance: &Instance) -> Result<SolveOutcome> {
        self.validate(instance)?;
        let n = instance.n_vars();
        if n > MAX_VARS {
            return Err(SolverError::SolverNotAvailable(format!(
                "{} variables is too many to enumerate",
                n
            )));
        }

        let mut best: Option<(f64, Vec<f64>)> = None;
        for mask in 0u32..(1 << n) {
            let x: Vec<f64> = (0..n).map(|k| ((mask >> k) & 1) as f64).collect();
            if instance.max_constraint_violation(&x) > 1e-9 {
                continue;
            }
            let value = instance.evaluate(&x);
            if best.as_ref().map_or(true, |(b, _)| value < *b) {
                best = Some((value, x));
            }
        }

        Ok(match best {
            Some((value, x)) => SolveOutcome::optimal(value, x),
            None => SolveOutcome::without_solution(SolveStatus::Infeasible),
        })
    }

    fn name(&self) -> &str {
        "brute force"
    }
}
