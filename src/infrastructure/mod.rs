//! Infrastructure layer: configuration and the vector pipeline internals.

pub mod config;
pub mod vector;
