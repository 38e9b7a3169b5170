//! Interface definitions for the profile indexer repository.

mod search_index_provider;

pub use search_index_provider::SearchIndexProvider;
