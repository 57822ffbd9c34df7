//! # cloudvault-entity
//!
//! Record models for CloudVault. Every struct in this crate is either a
//! stored record (file, folder, share link), a closed request type that
//! describes how a record may be created or changed, or a derived view.
//! All derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

pub mod file;
pub mod folder;
pub mod share;
