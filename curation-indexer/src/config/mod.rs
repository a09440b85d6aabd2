//! Configuration and dependency wiring for the curation indexer.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::IndexerSettings;
