// Domain module: MILP data model, solver port and randomness

pub mod models;
pub mod random;
pub mod solver_service;
pub mod value_objects;

pub use models::*;
pub use random::*;
pub use solver_service::*;
pub use value_objects::*;
