//! Wall-clock abstraction.

use std::fmt::Debug;

use chrono::{DateTime, Utc};

/// Source of the current time for timestamps and expiry checks.
pub trait Clock: Debug + Send + Sync + 'static {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}
