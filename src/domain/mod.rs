// Domain module: diet entities, optimization models and the solver contract

pub mod food;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use food::*;
pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
