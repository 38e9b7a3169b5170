//! Configuration module for the profile indexer.

mod dependencies;

pub use dependencies::{ConnectionMode, Dependencies};
