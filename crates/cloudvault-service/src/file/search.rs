//! File list views: recent, starred, and name search.

use std::sync::Arc;

use cloudvault_core::error::AppError;
use cloudvault_core::traits::{Latency, Repository};
use cloudvault_core::types::Operation;
use cloudvault_entity::file::File;
use cloudvault_store::MemoryStore;

/// Read-only views over the files outside the trash.
#[derive(Debug, Clone)]
pub struct SearchService {
    /// File store.
    file_repo: Arc<MemoryStore<File>>,
    /// Simulated network delay.
    latency: Arc<dyn Latency>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(file_repo: Arc<MemoryStore<File>>, latency: Arc<dyn Latency>) -> Self {
        Self { file_repo, latency }
    }

    /// Most recently modified files first, at most `limit` of them.
    pub async fn recent(&self, limit: usize) -> Result<Vec<File>, AppError> {
        self.latency.simulate(Operation::FileGetAll).await;

        let mut files = self.file_repo.find_where(&|f: &File| f.is_active()).await;
        files.sort_by(|a, b| b.modified_date.cmp(&a.modified_date));
        files.truncate(limit);
        Ok(files)
    }

    /// Starred files, in insertion order.
    pub async fn starred(&self) -> Result<Vec<File>, AppError> {
        self.latency.simulate(Operation::FileGetAll).await;
        Ok(self
            .file_repo
            .find_where(&|f: &File| f.is_active() && f.is_starred)
            .await)
    }

    /// Files whose name contains `query`, ignoring case.
    pub async fn search(&self, query: &str) -> Result<Vec<File>, AppError> {
        self.latency.simulate(Operation::FileGetAll).await;
        Ok(self
            .file_repo
            .find_where(&|f: &File| f.is_active() && f.matches_query(query))
            .await)
    }
}
