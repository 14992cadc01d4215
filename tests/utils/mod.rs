pub mod event_builders;
pub mod setup;

// Re-export main utilities for use by test files
pub use event_builders::EventBuilder;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
