//! netprobe - network and console probe harness
//!
//! A fixed catalog of named probes (fetch-style HTTP, a promise-style
//! client, GraphQL, a callback-driven binary transfer and console logging)
//! run through a dispatcher that keeps one in-flight slot and one last
//! result.

pub mod catalog;
pub mod cli;
pub mod client;
pub mod commands;
pub mod common;
pub mod console;
pub mod dispatcher;
pub mod graphql;
pub mod probes;
pub mod testing;
pub mod transport;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use dispatcher::{Dispatcher, Outcome, RunReport};
