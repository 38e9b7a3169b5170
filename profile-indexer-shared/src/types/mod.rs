//! Core data structures shared between the pipeline and the repository layer.

pub mod platform;
pub mod profile_document;
pub mod profile_event;

pub use platform::Platform;
pub use profile_document::ProfileDocument;
pub use profile_event::ProfileEvent;
