//! Compiler module for the curation indexer pipeline.
//!
//! Turns validated events into index commands.

mod command_compiler;
mod documents;

pub use command_compiler::CommandCompiler;
