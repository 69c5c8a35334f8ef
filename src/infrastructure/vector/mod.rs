//! Vector infrastructure: chunking, indexing, and artifact persistence.

pub mod artifacts;
pub mod chunker;
pub mod flat_index;
pub mod store_builder;

pub use artifacts::{ArtifactStore, Manifest};
pub use chunker::Chunker;
pub use flat_index::FlatIndex;
pub use store_builder::StoreBuilder;
