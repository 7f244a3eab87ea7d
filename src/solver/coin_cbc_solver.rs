use crate::domain::{
    models::{Instance, SolveOutcome, SolverConfig},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{ConstraintType, SolveStatus},
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolutionStatus, SolverModel, Variable as GoodLpVariable,
};
use log::debug;
use std::time::Instant;

pub struct CoinCbcSolver {
    config: SolverConfig,
}

impl CoinCbcSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// CBC command-line parameters matching the configuration
    fn parameters(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("logLevel", if self.config.verbose { "1" } else { "0" }.to_string())];
        if let Some(limit) = self.config.time_limit_secs {
            params.push(("seconds", limit.to_string()));
        }
        if self.config.disable_heuristics {
            params.push(("heuristicsOnOff", "off".to_string()));
        }
        if self.config.disable_cuts {
            params.push(("cutsOnOff", "off".to_string()));
        }
        if self.config.disable_presolve {
            params.push(("preprocess", "off".to_string()));
            params.push(("presolve", "off".to_string()));
        }
        if self.config.strong_branching {
            params.push(("strongBranching", "100".to_string()));
        }
        params
    }

    /// Only a proven optimum keeps its assignment. good_lp hands back time and
    /// gap limited runs as `Ok` with the incumbent, those are rejected here.
    fn outcome(
        instance: &Instance,
        result: std::result::Result<SolutionStatus, ResolutionError>,
        assignment: impl FnOnce() -> Vec<f64>,
    ) -> Result<SolveOutcome> {
        match result {
            Ok(SolutionStatus::Optimal) => {
                let assignment = assignment();
                let objective_value = instance.evaluate(&assignment);
                Ok(SolveOutcome::optimal(objective_value, assignment))
            }
            Ok(SolutionStatus::TimeLimit) => {
                Ok(SolveOutcome::without_solution(SolveStatus::TimeLimit))
            }
            Ok(SolutionStatus::GapLimit) => {
                Ok(SolveOutcome::without_solution(SolveStatus::NotSolved))
            }
            Err(ResolutionError::Infeasible) => {
                Ok(SolveOutcome::without_solution(SolveStatus::Infeasible))
            }
            Err(ResolutionError::Unbounded) => {
                Ok(SolveOutcome::without_solution(SolveStatus::NotSolved))
            }
            // stopped, abandoned or interrupted for a reason other than time
            Err(ResolutionError::Other(reason)) => {
                debug!("CBC gave up on {}: {}", instance.name, reason);
                Ok(SolveOutcome::without_solution(SolveStatus::NotSolved))
            }
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, instance: &Instance) -> Result<SolveOutcome> {
        self.validate(instance)?;

        let start_time = Instant::now();

        let mut vars = variables!();
        let lp_variables: Vec<GoodLpVariable> = (0..instance.n_vars())
            .map(|_| vars.add(variable().binary()))
            .collect();

        let mut obj_expr: Expression = 0.into();
        for (&coeff, &var) in instance.objective.iter().zip(&lp_variables) {
            if coeff != 0.0 {
                obj_expr += coeff * var;
            }
        }

        let mut lp_model = vars.minimise(obj_expr).using(coin_cbc::coin_cbc);
        for (key, value) in self.parameters() {
            lp_model.set_parameter(key, &value);
        }

        for ((row, &sense), &rhs) in instance
            .matrix
            .iter()
            .zip(&instance.constraint_types)
            .zip(&instance.rhs)
        {
            let mut lhs: Expression = 0.into();
            for (&coeff, &var) in row.iter().zip(&lp_variables) {
                if coeff != 0.0 {
                    lhs += coeff * var;
                }
            }

            lp_model = match sense {
                ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(rhs)),
                ConstraintType::Equal => lp_model.with(lhs.eq(rhs)),
                ConstraintType::GreaterThanOrEqual => lp_model.with(lhs.geq(rhs)),
            };
        }

        let solution_result = lp_model.solve();
        debug!(
            "CBC finished {} in {:.1} ms",
            instance.name,
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        match solution_result {
            Ok(sol) => Self::outcome(instance, Ok(sol.status()), || {
                lp_variables.iter().map(|&var| sol.value(var)).collect()
            }),
            Err(e) => Self::outcome(instance, Err(e), Vec::new),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
