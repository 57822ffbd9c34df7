//! File services: lifecycle CRUD, upload simulation, and list views.

pub mod search;
pub mod service;
pub mod upload;

pub use search::SearchService;
pub use service::FileService;
pub use upload::UploadService;
