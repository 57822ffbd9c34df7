//! Share link domain entities.

pub mod model;

pub use model::{CreateShareLink, ShareLink, SharedFile, UpdateShareLink};
