//! Share link issuing and access tracking.

pub mod link;
pub mod service;

pub use link::LinkService;
pub use service::ShareService;
