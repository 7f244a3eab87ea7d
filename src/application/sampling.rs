// Retry-until-feasible sampling of labelled instances
//
// Draw, solve, keep only proven-optimal instances, within a budget of
// ceil(1.25 * n) draws per batch.

use std::path::Path;

use log::{debug, info, warn};

use crate::domain::{Instance, RandomSource, SolverError, SolverService};
use crate::generator::{GenerationError, InstanceGenerator};
use crate::infrastructure::BinaryExporter;

#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type Result<T> = std::result::Result<T, SamplingError>;

/// Largest number of draws a batch of `n_problems` may make, ceil(1.25 n).
pub fn max_attempts(n_problems: usize) -> usize {
    n_problems.saturating_add(n_problems.div_ceil(4))
}

/// Summary of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub family: &'static str,
    pub requested: usize,
    pub attempts: usize,
    pub accepted: usize,
    pub exported: usize,
    pub failed_exports: usize,
}

impl BatchReport {
    pub fn is_short(&self) -> bool {
        self.accepted < self.requested
    }
}

/// Drives generators against a solver with one shared random stream
pub struct SamplingLoop<'a> {
    solver: &'a dyn SolverService,
    rng: RandomSource,
}

impl<'a> SamplingLoop<'a> {
    pub fn new(solver: &'a dyn SolverService, rng: RandomSource) -> Self {
        Self { solver, rng }
    }

    /// Collect up to `n_problems` feasible instances.
    ///
    /// The result is short when the attempt budget runs out first; callers
    /// compare its length with `n_problems`. Instance ids follow the accepted
    /// count, so names stay dense across rejected draws.
    pub fn generate_batch(
        &mut self,
        n_problems: usize,
        generator: &dyn InstanceGenerator,
    ) -> Result<Vec<Instance>> {
        let (instances, _) = self.run_batch(n_problems, generator)?;
        Ok(instances)
    }

    /// Generate a batch and write every accepted instance to `output_dir`.
    ///
    /// A failed export is logged and counted; it does not stop the batch.
    pub fn generate_and_export(
        &mut self,
        n_problems: usize,
        generator: &dyn InstanceGenerator,
        output_dir: &Path,
    ) -> Result<BatchReport> {
        let (instances, attempts) = self.run_batch(n_problems, generator)?;
        let mut report = BatchReport {
            family: generator.family(),
            requested: n_problems,
            attempts,
            accepted: instances.len(),
            ..BatchReport::default()
        };

        for instance in &instances {
            match BinaryExporter::export(instance, output_dir) {
                Ok(path) => {
                    info!("Exported {} to {}", instance.name, path.display());
                    report.exported += 1;
                }
                Err(e) => {
                    warn!("Skipping export of {}: {}", instance.name, e);
                    report.failed_exports += 1;
                }
            }
        }

        Ok(report)
    }

    fn run_batch(
        &mut self,
        n_problems: usize,
        generator: &dyn InstanceGenerator,
    ) -> Result<(Vec<Instance>, usize)> {
        generator.validate()?;

        let budget = max_attempts(n_problems);
        let mut accepted = Vec::with_capacity(n_problems);
        let mut attempts = 0;

        while accepted.len() < n_problems && attempts < budget {
            attempts += 1;
            let mut instance = generator.generate(accepted.len(), &mut self.rng)?;
            let status = self.solver.label(&mut instance)?;

            if !instance.is_feasible() {
                debug!("Rejected draw for {}: {}", instance.name, status);
                continue;
            }
            if let Some(solution) = &instance.solution {
                debug!(
                    "Accepted {} ({} vars, {} rows, objective {}, max violation {:e})",
                    instance.name,
                    instance.n_vars(),
                    instance.n_constraints(),
                    solution.objective_value,
                    instance.max_constraint_violation(&solution.assignment)
                );
            }
            accepted.push(instance);
        }

        info!(
            "{}: {}/{} instances after {} attempts using {}",
            generator.family(),
            accepted.len(),
            n_problems,
            attempts,
            self.solver.name()
        );

        Ok((accepted, attempts))
    }
}
