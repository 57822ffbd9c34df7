//! Integration tests for share links.

mod helpers;

use chrono::Duration;

use cloudvault_core::traits::Clock;
use cloudvault_core::types::{FileId, ShareLinkId};
use cloudvault_entity::share::{CreateShareLink, UpdateShareLink};

use helpers::{TestVault, file_id};

#[tokio::test]
async fn test_expiry_classification() {
    let t = TestVault::empty();
    let now = t.clock.now();
    let shares = t.vault.shares();

    let past = shares
        .create(CreateShareLink {
            file_id: FileId::new(),
            expiry_date: Some(now - Duration::seconds(1)),
        })
        .await
        .unwrap();
    let future = shares
        .create(CreateShareLink {
            file_id: FileId::new(),
            expiry_date: Some(now + Duration::hours(1)),
        })
        .await
        .unwrap();
    let forever = shares
        .create(CreateShareLink {
            file_id: FileId::new(),
            expiry_date: None,
        })
        .await
        .unwrap();

    assert!(past.is_expired(now));
    assert!(!future.is_expired(now));
    assert!(!forever.is_expired(now));

    let expired = shares.get_expired().await.unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].id, past.id);
}

#[tokio::test]
async fn test_sample_links() {
    let t = TestVault::new();
    let shares = t.vault.shares();

    let expired = shares.get_expired().await.unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(expired[0].file_id, file_id(helpers::Q1_SUMMARY));

    let beach = shares
        .get_by_file(file_id(helpers::BEACH))
        .await
        .unwrap()
        .expect("beach link");
    assert!(beach.expiry_date.is_none());
    assert_eq!(beach.token(), "beach9v3n6q1zt");

    assert!(
        shares
            .get_by_file(file_id(helpers::WELCOME_PDF))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_issued_url_shape() {
    let t = TestVault::empty();
    let link = t
        .vault
        .shares()
        .create(CreateShareLink {
            file_id: FileId::new(),
            expiry_date: None,
        })
        .await
        .unwrap();

    let token = link
        .url
        .strip_prefix("https://cloudvault.app/s/")
        .expect("configured prefix");
    assert_eq!(token.len(), 13);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric() && !c.is_ascii_uppercase()));
    assert_eq!(link.access_count, 0);
    assert_eq!(link.created_date, helpers::epoch());
}

#[tokio::test]
async fn test_increment_access() {
    let t = TestVault::new();
    let shares = t.vault.shares();
    let beach = shares
        .get_by_file(file_id(helpers::BEACH))
        .await
        .unwrap()
        .expect("beach link");

    let bumped = shares.increment_access(beach.id).await.unwrap();
    assert_eq!(bumped.access_count, beach.access_count + 1);

    let err = shares.increment_access(ShareLinkId::new()).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_expiry() {
    let t = TestVault::new();
    let shares = t.vault.shares();
    let q1 = shares
        .get_by_file(file_id(helpers::Q1_SUMMARY))
        .await
        .unwrap()
        .expect("q1 link");

    let extended = shares
        .update(
            q1.id,
            UpdateShareLink {
                expiry_date: Some(None),
            },
        )
        .await
        .unwrap();
    assert!(extended.expiry_date.is_none());
    assert!(shares.get_expired().await.unwrap().is_empty());

    let err = shares
        .update(ShareLinkId::new(), UpdateShareLink::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_revokes_every_link_of_file() {
    let t = TestVault::new();
    let shares = t.vault.shares();
    let beach = file_id(helpers::BEACH);

    shares
        .create(CreateShareLink {
            file_id: beach,
            expiry_date: None,
        })
        .await
        .unwrap();

    assert_eq!(shares.delete(beach).await.unwrap(), 2);
    assert!(shares.get_by_file(beach).await.unwrap().is_none());
    assert_eq!(shares.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_access_by_token() {
    let t = TestVault::new();
    let shares = t.vault.shares();

    let opened = shares.access_by_token("beach9v3n6q1zt").await.unwrap();
    assert_eq!(opened.access_count, 4);

    // Expired in April.
    let err = shares.access_by_token("q1sum8k2m4x7p").await.unwrap_err();
    assert!(err.is_not_found());

    let err = shares.access_by_token("unknown").await.unwrap_err();
    assert!(err.is_not_found());
}
