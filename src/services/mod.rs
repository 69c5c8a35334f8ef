//! Service layer: retrieval, synthesis, and the pipeline facade.

pub mod pipeline;
pub mod retriever;
pub mod synthesizer;

pub use pipeline::Pipeline;
pub use retriever::Retriever;
pub use synthesizer::{dedup_sources, Synthesizer};
