//! GraphQL implementation of the content graph provider.

mod client;
mod queries;

pub use client::ContentGraphClient;
