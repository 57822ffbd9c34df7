//! Upload simulation.
//!
//! No bytes travel anywhere. An upload waits out the simulated transfer,
//! then records the file with local object URLs standing in for the
//! content and preview locations.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use cloudvault_core::error::AppError;
use cloudvault_core::traits::{Clock, Latency, Repository};
use cloudvault_core::types::{FileId, FolderId, Operation};
use cloudvault_entity::file::{CreateFile, File, UploadBlob};
use cloudvault_store::MemoryStore;

use super::service::validate_name;
use crate::batch::BatchOutcome;

/// Scheme prefix for the locally generated object URLs.
const OBJECT_URL_PREFIX: &str = "blob:cloudvault/";

/// Turns picked local files into file records.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// File store.
    file_repo: Arc<MemoryStore<File>>,
    /// Simulated network delay.
    latency: Arc<dyn Latency>,
    /// Time source for timestamps.
    clock: Arc<dyn Clock>,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        file_repo: Arc<MemoryStore<File>>,
        latency: Arc<dyn Latency>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            file_repo,
            latency,
            clock,
        }
    }

    /// Uploads one file into `folder_id` (`None` for root).
    pub async fn upload(
        &self,
        blob: UploadBlob,
        folder_id: Option<FolderId>,
    ) -> Result<File, AppError> {
        self.latency.simulate(Operation::FileUpload).await;
        validate_name(&blob.name)?;

        let download_url = object_url();
        let thumbnail_url = blob.is_image().then(|| download_url.clone());

        let data = CreateFile {
            name: blob.name,
            size: blob.size,
            mime_type: blob.mime_type,
            folder_id,
            thumbnail_url,
            download_url,
        };
        let file = self
            .file_repo
            .insert(File::new(FileId::new(), data, self.clock.now()))
            .await?;

        info!(
            file_id = %file.id,
            name = %file.name,
            size = file.size,
            folder_id = ?folder_id,
            "File uploaded"
        );

        Ok(file)
    }

    /// Uploads files one after another. Stops at the first failure; files
    /// uploaded before it remain.
    pub async fn upload_batch(
        &self,
        blobs: Vec<UploadBlob>,
        folder_id: Option<FolderId>,
    ) -> BatchOutcome<File> {
        let total = blobs.len();
        let mut outcome = BatchOutcome::new();

        for (index, blob) in blobs.into_iter().enumerate() {
            match self.upload(blob, folder_id).await {
                Ok(file) => outcome.push(file),
                Err(error) => {
                    warn!(index, error = %error, "Batch upload stopped");
                    outcome.stop(index, total, error);
                    break;
                }
            }
        }

        outcome
    }
}

/// A fresh local object URL.
fn object_url() -> String {
    format!("{OBJECT_URL_PREFIX}{}", Uuid::new_v4())
}
