// Application layer: batch orchestration on top of the domain

pub mod sampling;

pub use sampling::{max_attempts, BatchReport, SamplingError, SamplingLoop};
