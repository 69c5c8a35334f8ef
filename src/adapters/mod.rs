//! Adapters implementing the domain ports against external collaborators.

pub mod acquisition;
pub mod gemini;
