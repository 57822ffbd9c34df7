//! # cloudvault-store
//!
//! The storage side of CloudVault:
//!
//! - **memory**: the insertion-ordered, id-indexed [`MemoryStore`] every
//!   record type lives in
//! - **seed**: fixture data the stores are seeded from
//! - **latency** / **clock**: implementations of the core timing traits

pub mod clock;
pub mod latency;
pub mod memory;
pub mod seed;

pub use clock::{ManualClock, SystemClock};
pub use latency::{NoLatency, SimulatedLatency};
pub use memory::MemoryStore;
pub use seed::Fixtures;
