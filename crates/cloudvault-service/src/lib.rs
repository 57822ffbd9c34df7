//! # cloudvault-service
//!
//! Business logic for CloudVault. Each service owns a handle to its record
//! store plus the injected latency and clock, and returns owned copies of
//! records. [`Vault`] wires the services together and implements the
//! operations that span more than one store.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod batch;
pub mod context;
pub mod file;
pub mod folder;
pub mod share;

pub use batch::{BatchFailure, BatchOutcome, BatchSummary};
pub use context::{FolderView, Vault, VaultBuilder};
pub use file::{FileService, SearchService, UploadService};
pub use folder::{FolderService, TreeService};
pub use share::{LinkService, ShareService};
