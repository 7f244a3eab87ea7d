// Domain value objects shared by generators, solvers and the binary format

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sense of a constraint row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    /// Less than or equal (≤)
    LessThanOrEqual,
    /// Equal (=)
    Equal,
    /// Greater than or equal (≥)
    GreaterThanOrEqual,
}

impl ConstraintType {
    /// One-byte tag used in exported dataset files.
    pub fn tag(self) -> u8 {
        match self {
            ConstraintType::LessThanOrEqual => b'L',
            ConstraintType::Equal => b'E',
            ConstraintType::GreaterThanOrEqual => b'G',
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'L' => Some(ConstraintType::LessThanOrEqual),
            b'E' => Some(ConstraintType::Equal),
            b'G' => Some(ConstraintType::GreaterThanOrEqual),
            _ => None,
        }
    }

    /// Whether `lhs` satisfies this sense against `rhs` within `tolerance`.
    pub fn holds(self, lhs: f64, rhs: f64, tolerance: f64) -> bool {
        self.violation(lhs, rhs) <= tolerance
    }

    /// Amount by which `lhs` misses `rhs`; zero when satisfied.
    pub fn violation(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            ConstraintType::LessThanOrEqual => (lhs - rhs).max(0.0),
            ConstraintType::GreaterThanOrEqual => (rhs - lhs).max(0.0),
            ConstraintType::Equal => (lhs - rhs).abs(),
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintType::LessThanOrEqual => write!(f, "<="),
            ConstraintType::Equal => write!(f, "="),
            ConstraintType::GreaterThanOrEqual => write!(f, ">="),
        }
    }
}

/// Outcome reported by a solver backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Proven optimal solution
    Optimal,
    /// Proven to have no feasible assignment
    Infeasible,
    /// Wall-clock limit reached before optimality was proven
    TimeLimit,
    /// Any other non-optimal termination (unbounded, numerical trouble, ...)
    NotSolved,
}

impl SolveStatus {
    /// Only proven optimal solves label an instance as feasible.
    pub fn is_feasible(self) -> bool {
        self == SolveStatus::Optimal
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::TimeLimit => write!(f, "Time Limit Reached"),
            SolveStatus::NotSolved => write!(f, "Not Solved"),
        }
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// HiGHS
    #[default]
    Highs,
    /// COIN-OR CBC
    #[serde(alias = "cbc")]
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
        }
    }
}
