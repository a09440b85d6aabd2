//! # Curation Indexer Pipeline
//!
//! This crate turns batches of curation events delivered by a queue into a
//! single bulk write against the search backend, and reports failures back
//! per message.
//!
//! ## Architecture
//!
//! 1. **Consumer**: Decodes queue records into typed envelopes
//! 2. **Validator**: Resolves each envelope's language to an index
//! 3. **Resolver**: Runs the content-graph lookups needed for dedup and merge
//! 4. **Compiler**: Turns each event into ordered index commands
//! 5. **Assembler**: Flattens all commands into one bulk request
//! 6. **Reconciler**: Maps per-operation errors back to message ids
//! 7. **Orchestrator**: Coordinates the flow for one batch

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod consumer;
pub mod errors;
pub mod orchestrator;
pub mod reconciler;
pub mod resolver;
pub mod validator;

pub use errors::PipelineError;
