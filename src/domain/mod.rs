//! Domain layer: pure data types, errors, and collaborator ports.

pub mod errors;
pub mod models;
pub mod ports;
