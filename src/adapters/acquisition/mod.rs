//! Acquisition adapters for the document source port.

pub mod json_file;

pub use json_file::JsonFileSource;
