//! CLI command implementations.

pub mod describe;
pub mod doctor;
pub mod emit;
pub mod resolve;
pub mod targets;
pub mod types;
