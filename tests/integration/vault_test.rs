//! Integration tests for operations spanning several stores.

mod helpers;

use chrono::Duration;

use cloudvault_core::config::AppConfig;
use cloudvault_core::error::ErrorKind;
use cloudvault_core::traits::Clock;
use cloudvault_core::types::FileId;
use cloudvault_entity::share::CreateShareLink;
use cloudvault_service::{BatchSummary, Vault};

use helpers::{TestVault, file_id, folder_id};

#[tokio::test]
async fn test_share_file_uses_default_expiry() {
    let t = TestVault::new();
    let welcome = file_id(helpers::WELCOME_PDF);

    let link = t.vault.share_file(welcome, None).await.unwrap();
    assert_eq!(link.expiry_date, Some(t.clock.now() + Duration::days(7)));

    let file = t.vault.files().get_by_id(welcome).await.unwrap();
    assert_eq!(file.share_link, Some(link.url.clone()));

    let shared = t.vault.shared_files().await.unwrap();
    assert_eq!(shared.len(), 3);
    assert!(shared.iter().any(|s| s.file.id == welcome && s.link.id == link.id));
}

#[tokio::test]
async fn test_share_file_explicit_expiry() {
    let t = TestVault::new();
    let expiry = t.clock.now() + Duration::hours(3);

    let link = t
        .vault
        .share_file(file_id(helpers::BUDGET), Some(expiry))
        .await
        .unwrap();
    assert_eq!(link.expiry_date, Some(expiry));
}

#[tokio::test]
async fn test_share_file_rejects_missing_and_trashed() {
    let t = TestVault::new();

    let err = t.vault.share_file(FileId::new(), None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = t
        .vault
        .share_file(file_id(helpers::OLD_NOTES), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_revoke_sharing_clears_file() {
    let t = TestVault::new();
    let beach = file_id(helpers::BEACH);

    assert_eq!(t.vault.revoke_sharing(beach).await.unwrap(), 1);
    let file = t.vault.files().get_by_id(beach).await.unwrap();
    assert!(file.share_link.is_none());
    assert!(t.vault.shares().get_by_file(beach).await.unwrap().is_none());
}

#[tokio::test]
async fn test_shared_files_skip_dangling_links() {
    let t = TestVault::new();
    t.vault
        .shares()
        .create(CreateShareLink {
            file_id: FileId::new(),
            expiry_date: None,
        })
        .await
        .unwrap();

    let shared = t.vault.shared_files().await.unwrap();
    assert_eq!(shared.len(), 2);
}

#[tokio::test]
async fn test_delete_folder_trashes_contained_files() {
    let t = TestVault::new();

    let removed = t
        .vault
        .delete_folder(folder_id(helpers::DOCUMENTS))
        .await
        .unwrap();
    assert_eq!(removed.len(), 4);

    let trash = t.vault.files().get_deleted().await.unwrap();
    // Two already trashed plus Q1 Summary, Annual Report, Budget, Passport.
    assert_eq!(trash.len(), 6);
    for id in [
        helpers::Q1_SUMMARY,
        helpers::ANNUAL_REPORT,
        helpers::BUDGET,
        helpers::PASSPORT,
    ] {
        assert!(trash.iter().any(|f| f.id == file_id(id)));
    }
}

#[tokio::test]
async fn test_restore_into_deleted_folder_lands_at_root() {
    let t = TestVault::new();
    let budget = file_id(helpers::BUDGET);

    t.vault.delete_folder(folder_id(helpers::WORK)).await.unwrap();
    let restored = t.vault.restore_file(budget).await.unwrap();

    assert!(!restored.is_deleted);
    assert!(restored.folder_id.is_none());
    let root = t.vault.files().get_by_folder(None).await.unwrap();
    assert!(root.iter().any(|f| f.id == budget));
}

#[tokio::test]
async fn test_restore_keeps_existing_folder() {
    let t = TestVault::new();
    let passport = file_id(helpers::PASSPORT);

    t.vault.files().delete(passport).await.unwrap();
    let restored = t.vault.restore_file(passport).await.unwrap();
    assert_eq!(restored.folder_id, Some(folder_id(helpers::PERSONAL)));
}

#[tokio::test]
async fn test_purge_file_revokes_links() {
    let t = TestVault::new();
    let beach = file_id(helpers::BEACH);

    assert!(t.vault.purge_file(beach).await.unwrap());
    assert!(t.vault.files().get_by_id(beach).await.unwrap_err().is_not_found());
    assert!(t.vault.shares().get_by_file(beach).await.unwrap().is_none());
    assert!(!t.vault.purge_file(beach).await.unwrap());
}

#[tokio::test]
async fn test_restore_many_stops_at_first_failure() {
    let t = TestVault::new();
    let ids = [
        file_id(helpers::OLD_NOTES),
        FileId::new(),
        file_id(helpers::PODCAST),
    ];

    let outcome = t.vault.restore_many(&ids).await;
    assert_eq!(outcome.completed.len(), 1);
    assert_eq!(outcome.skipped, 1);
    let failure = outcome.failure.as_ref().expect("second id fails");
    assert_eq!(failure.index, 1);
    assert!(failure.error.is_not_found());

    let summary = BatchSummary::from(&outcome);
    assert_eq!(summary.completed, 1);
    assert!(summary.error.is_some());

    // Committed before the failure, not rolled back.
    let notes = t.vault.files().get_by_id(ids[0]).await.unwrap();
    assert!(!notes.is_deleted);
    let podcast = t.vault.files().get_by_id(ids[2]).await.unwrap();
    assert!(podcast.is_deleted);
}

#[tokio::test]
async fn test_empty_trash() {
    let t = TestVault::new();

    let outcome = t.vault.empty_trash().await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.completed.len(), 2);
    assert!(t.vault.files().get_deleted().await.unwrap().is_empty());
    assert_eq!(
        t.vault.files().get_all().await.unwrap().len(),
        helpers::SAMPLE_FILES - 2
    );
}

#[tokio::test]
async fn test_folder_view() {
    let t = TestVault::new();

    let view = t
        .vault
        .folder_view(Some(folder_id(helpers::WORK)))
        .await
        .unwrap();
    assert_eq!(view.current.map(|f| f.name), Some("Work".to_string()));
    let trail: Vec<&str> = view.breadcrumbs.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(trail, vec!["Documents", "Work"]);
    assert_eq!(view.folders.len(), 1);
    assert_eq!(view.folders[0].name, "Reports");
    let files: Vec<&str> = view.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(files, vec!["Q1 Summary.docx", "Budget.xlsx"]);

    let root = t.vault.folder_view(None).await.unwrap();
    assert!(root.current.is_none());
    assert!(root.breadcrumbs.is_empty());
    assert_eq!(root.folders.len(), 3);
    assert_eq!(root.files.len(), 1);

    let err = t
        .vault
        .folder_view(Some(cloudvault_core::types::FolderId::new()))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_reset_restores_sample_drive() {
    let t = TestVault::new();

    t.vault.delete_folder(folder_id(helpers::DOCUMENTS)).await.unwrap();
    t.vault.empty_trash().await.unwrap();
    t.vault.share_file(file_id(helpers::WELCOME_PDF), None).await.unwrap();

    t.vault.reset().await;

    assert_eq!(
        t.vault.files().get_all().await.unwrap().len(),
        helpers::SAMPLE_FILES
    );
    assert_eq!(
        t.vault.folders().get_all().await.unwrap().len(),
        helpers::SAMPLE_FOLDERS
    );
    assert_eq!(t.vault.shares().get_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_from_config_reads_fixture_dir() {
    let dir = std::env::temp_dir().join(format!("cloudvault-{}", uuid::Uuid::new_v4()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(
        dir.join("folders.json"),
        r#"[{"id":"01900000-0000-7000-8000-0000000000c1","name":"Only","parent_id":null,"path":"Only","created_date":"2024-01-01T00:00:00Z"}]"#,
    )
    .await
    .unwrap();

    let mut config = AppConfig::default();
    config.vault.fixtures_dir = Some(dir.to_string_lossy().into_owned());
    config.latency.enabled = false;

    let vault = Vault::from_config(config).await.unwrap();
    assert!(vault.files().get_all().await.unwrap().is_empty());
    assert!(vault.shares().get_all().await.unwrap().is_empty());
    let folders = vault.folders().get_all().await.unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].name, "Only");

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
