//! Processor module for the profile indexing pipeline.
//!
//! Parses delivery payloads and enriches profile events.

mod profile_processor;

pub use profile_processor::{Enrichment, ProfileProcessor, DEFAULT_ENRICHMENT_DEADLINE};
