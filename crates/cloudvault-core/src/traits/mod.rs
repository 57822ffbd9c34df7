//! Core traits defined in `cloudvault-core` and implemented by other crates.

pub mod clock;
pub mod latency;
pub mod repository;

pub use clock::Clock;
pub use latency::Latency;
pub use repository::{BulkMutation, Mutation, Predicate, Record, Repository};
