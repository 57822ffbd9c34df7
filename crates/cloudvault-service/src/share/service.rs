//! Share link CRUD service.

use std::sync::Arc;

use tracing::info;

use cloudvault_core::error::AppError;
use cloudvault_core::traits::{Clock, Latency, Repository};
use cloudvault_core::types::{FileId, Operation, ShareLinkId};
use cloudvault_entity::share::{CreateShareLink, ShareLink, UpdateShareLink};
use cloudvault_store::MemoryStore;

use super::link::LinkService;

/// Manages share link issuing, updates, and revocation.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share link store.
    share_repo: Arc<MemoryStore<ShareLink>>,
    /// Token and URL generation.
    link_service: Arc<LinkService>,
    /// Simulated network delay.
    latency: Arc<dyn Latency>,
    /// Time source for timestamps and expiry checks.
    clock: Arc<dyn Clock>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<MemoryStore<ShareLink>>,
        link_service: Arc<LinkService>,
        latency: Arc<dyn Latency>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            share_repo,
            link_service,
            latency,
            clock,
        }
    }

    /// Lists every share link in insertion order.
    pub async fn get_all(&self) -> Result<Vec<ShareLink>, AppError> {
        self.latency.simulate(Operation::ShareGetAll).await;
        Ok(self.share_repo.list().await)
    }

    /// Gets a share link by ID.
    pub async fn get_by_id(&self, link_id: ShareLinkId) -> Result<ShareLink, AppError> {
        self.latency.simulate(Operation::ShareGetById).await;
        self.share_repo
            .find_by_id(&link_id)
            .await
            .ok_or_else(|| AppError::not_found("Share link not found"))
    }

    /// The first link issued for `file_id`, if any.
    pub async fn get_by_file(&self, file_id: FileId) -> Result<Option<ShareLink>, AppError> {
        self.latency.simulate(Operation::ShareGetByFile).await;
        Ok(self
            .share_repo
            .find_where(&|l: &ShareLink| l.file_id == file_id)
            .await
            .into_iter()
            .next())
    }

    /// Issues a new link. The file is not looked up here.
    pub async fn create(&self, req: CreateShareLink) -> Result<ShareLink, AppError> {
        self.latency.simulate(Operation::ShareCreate).await;

        let link = ShareLink {
            id: ShareLinkId::new(),
            file_id: req.file_id,
            url: self.link_service.new_url(),
            created_date: self.clock.now(),
            expiry_date: req.expiry_date,
            access_count: 0,
        };
        let link = self.share_repo.insert(link).await?;

        info!(
            link_id = %link.id,
            file_id = %link.file_id,
            expires = ?link.expiry_date,
            "Share link created"
        );

        Ok(link)
    }

    /// Changes a link's expiry.
    pub async fn update(
        &self,
        link_id: ShareLinkId,
        req: UpdateShareLink,
    ) -> Result<ShareLink, AppError> {
        self.latency.simulate(Operation::ShareUpdate).await;

        let link = self
            .share_repo
            .modify(
                &link_id,
                Box::new(move |l: &mut ShareLink| {
                    if let Some(expiry_date) = req.expiry_date {
                        l.expiry_date = expiry_date;
                    }
                }),
            )
            .await
            .ok_or_else(|| AppError::not_found("Share link not found"))?;

        info!(link_id = %link_id, expires = ?link.expiry_date, "Share link updated");

        Ok(link)
    }

    /// Revokes every link of `file_id`. Returns how many were removed.
    pub async fn delete(&self, file_id: FileId) -> Result<usize, AppError> {
        self.latency.simulate(Operation::ShareDelete).await;

        let removed = self
            .share_repo
            .remove_where(&|l: &ShareLink| l.file_id == file_id)
            .await
            .len();

        if removed > 0 {
            info!(file_id = %file_id, removed, "Share links revoked");
        }

        Ok(removed)
    }

    /// Records one access of a link.
    pub async fn increment_access(&self, link_id: ShareLinkId) -> Result<ShareLink, AppError> {
        self.latency.simulate(Operation::ShareIncrementAccess).await;
        self.share_repo
            .modify(
                &link_id,
                Box::new(|l: &mut ShareLink| l.access_count += 1),
            )
            .await
            .ok_or_else(|| AppError::not_found("Share link not found"))
    }

    /// Links whose expiry is already behind the clock.
    pub async fn get_expired(&self) -> Result<Vec<ShareLink>, AppError> {
        self.latency.simulate(Operation::ShareGetExpired).await;
        let now = self.clock.now();
        Ok(self
            .share_repo
            .find_where(&|l: &ShareLink| l.is_expired(now))
            .await)
    }

    /// Resolves a token to its link and counts the access.
    ///
    /// Unknown and expired tokens both fail with `NotFound`.
    pub async fn access_by_token(&self, token: &str) -> Result<ShareLink, AppError> {
        let now = self.clock.now();
        let link = self
            .share_repo
            .find_where(&|l: &ShareLink| l.token() == token)
            .await
            .into_iter()
            .next()
            .filter(|l| !l.is_expired(now))
            .ok_or_else(|| AppError::not_found("Share link not found or expired"))?;

        self.increment_access(link.id).await
    }
}
