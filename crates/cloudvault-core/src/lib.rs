//! # cloudvault-core
//!
//! Core crate for CloudVault. Contains the repository, latency, and clock
//! traits, configuration schemas, typed identifiers, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other CloudVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
