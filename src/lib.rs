//! Politburo - Standing Committee Politics Simulation

pub mod committee;
pub mod context;
pub mod core;
pub mod relations;
pub mod save;
