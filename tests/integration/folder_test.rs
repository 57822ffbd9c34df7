//! Integration tests for folder operations.

mod helpers;

use cloudvault_core::error::ErrorKind;
use cloudvault_core::types::FolderId;
use cloudvault_entity::folder::{CreateFolder, UpdateFolder};

use helpers::{TestVault, folder_id};

#[tokio::test]
async fn test_unknown_folder_is_not_found() {
    let t = TestVault::new();
    let folders = t.vault.folders();
    let missing = FolderId::new();

    assert!(folders.get_by_id(missing).await.unwrap_err().is_not_found());
    assert!(
        folders
            .update(missing, UpdateFolder::rename("x"))
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(folders.move_folder(missing, None).await.unwrap_err().is_not_found());
    assert!(folders.delete(missing).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_cascade_removes_all_descendants() {
    let t = TestVault::new();
    let documents = folder_id(helpers::DOCUMENTS);

    let removed = t.vault.folders().delete(documents).await.unwrap();

    // Documents plus Work, Reports, and Personal.
    assert_eq!(removed.len(), 4);
    let left = t.vault.folders().get_all().await.unwrap();
    assert_eq!(left.len(), helpers::SAMPLE_FOLDERS - 4);
    for id in [helpers::WORK, helpers::REPORTS, helpers::PERSONAL] {
        assert!(left.iter().all(|f| f.id != folder_id(id)));
    }
}

#[tokio::test]
async fn test_leaf_delete_removes_exactly_one() {
    let t = TestVault::new();

    let removed = t
        .vault
        .folders()
        .delete(folder_id(helpers::REPORTS))
        .await
        .unwrap();

    assert_eq!(removed, vec![folder_id(helpers::REPORTS)]);
    assert_eq!(
        t.vault.folders().get_all().await.unwrap().len(),
        helpers::SAMPLE_FOLDERS - 1
    );
}

#[tokio::test]
async fn test_breadcrumbs_run_root_to_leaf() {
    let t = TestVault::new();

    let trail: Vec<String> = t
        .vault
        .tree()
        .get_breadcrumbs(Some(folder_id(helpers::REPORTS)))
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();

    assert_eq!(trail, vec!["Documents", "Work", "Reports"]);
    assert!(t.vault.tree().get_breadcrumbs(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tree_and_child_counts() {
    let t = TestVault::new();
    let tree = t.vault.tree().get_tree().await.unwrap();

    assert_eq!(tree.total_folders, helpers::SAMPLE_FOLDERS);
    let roots: Vec<&str> = tree.roots.iter().map(|n| n.folder.name.as_str()).collect();
    assert_eq!(roots, vec!["Documents", "Photos", "Projects"]);

    // Work holds Reports plus two live files.
    let work = t.vault.folders().get_by_id(folder_id(helpers::WORK)).await.unwrap();
    assert_eq!(work.child_count, 3);

    // Photos holds Vacation 2024 plus Sunset.mp4.
    assert_eq!(tree.roots[1].folder.child_count, 2);
}

#[tokio::test]
async fn test_child_count_ignores_trashed_files() {
    let t = TestVault::new();
    let projects = folder_id(helpers::PROJECTS);

    let before = t.vault.folders().get_by_id(projects).await.unwrap();
    assert_eq!(before.child_count, 1);

    let roadmap = t.vault.files().get_by_folder(Some(projects)).await.unwrap()[0].id;
    t.vault.files().delete(roadmap).await.unwrap();

    let after = t.vault.folders().get_by_id(projects).await.unwrap();
    assert_eq!(after.child_count, 0);
}

#[tokio::test]
async fn test_create_under_parent_builds_path() {
    let t = TestVault::new();
    let vacation = folder_id(helpers::VACATION);

    let created = t
        .vault
        .folders()
        .create(CreateFolder::new("  Day 1  ", Some(vacation)))
        .await
        .unwrap();

    assert_eq!(created.name, "Day 1");
    assert_eq!(created.path, "Photos/Vacation 2024/Day 1");
    assert_eq!(created.created_date, helpers::epoch());

    let children = t.vault.folders().get_by_parent(Some(vacation)).await.unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, created.id);
}

#[tokio::test]
async fn test_create_with_missing_parent_uses_name_as_path() {
    let t = TestVault::new();
    let created = t
        .vault
        .folders()
        .create(CreateFolder::new("Loose", Some(FolderId::new())))
        .await
        .unwrap();
    assert_eq!(created.path, "Loose");
}

#[tokio::test]
async fn test_rename_rewrites_descendant_paths() {
    let t = TestVault::new();

    let renamed = t
        .vault
        .folders()
        .update(folder_id(helpers::WORK), UpdateFolder::rename("Office"))
        .await
        .unwrap();
    assert_eq!(renamed.path, "Documents/Office");

    let reports = t
        .vault
        .folders()
        .get_by_id(folder_id(helpers::REPORTS))
        .await
        .unwrap();
    assert_eq!(reports.path, "Documents/Office/Reports");
}

#[tokio::test]
async fn test_move_folder_rules() {
    let t = TestVault::new();
    let folders = t.vault.folders();

    let err = folders
        .move_folder(folder_id(helpers::DOCUMENTS), Some(folder_id(helpers::REPORTS)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let moved = folders
        .move_folder(folder_id(helpers::PERSONAL), Some(folder_id(helpers::PHOTOS)))
        .await
        .unwrap();
    assert_eq!(moved.path, "Photos/Personal");
    assert_eq!(moved.parent_id, Some(folder_id(helpers::PHOTOS)));

    let to_root = folders
        .move_folder(folder_id(helpers::WORK), None)
        .await
        .unwrap();
    assert!(to_root.is_root());
    let reports = folders.get_by_id(folder_id(helpers::REPORTS)).await.unwrap();
    assert_eq!(reports.path, "Work/Reports");
}

#[tokio::test]
async fn test_rename_of_name_with_slash_keeps_parent_prefix() {
    let t = TestVault::new();
    let folders = t.vault.folders();

    let slashed = folders
        .create(CreateFolder::new("A/B", None))
        .await
        .unwrap();
    let child = folders
        .create(CreateFolder::new("Inner", Some(slashed.id)))
        .await
        .unwrap();
    assert_eq!(slashed.path, "A/B");
    assert_eq!(child.path, "A/B/Inner");

    let renamed = folders
        .update(slashed.id, UpdateFolder::rename("C"))
        .await
        .unwrap();
    assert_eq!(renamed.path, "C");
    assert_eq!(folders.get_by_id(child.id).await.unwrap().path, "C/Inner");

    let nested = folders
        .create(CreateFolder::new("x/y", Some(folder_id(helpers::WORK))))
        .await
        .unwrap();
    let renamed = folders
        .update(nested.id, UpdateFolder::rename("z"))
        .await
        .unwrap();
    assert_eq!(renamed.path, "Documents/Work/z");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crossed_moves_never_form_a_cycle() {
    let t = TestVault::empty();

    for _ in 0..100 {
        let folders = t.vault.folders();
        let a = folders.create(CreateFolder::new("A", None)).await.unwrap().id;
        let b = folders.create(CreateFolder::new("B", None)).await.unwrap().id;

        let first = {
            let vault = t.vault.clone();
            tokio::spawn(async move { vault.folders().move_folder(a, Some(b)).await })
        };
        let second = {
            let vault = t.vault.clone();
            tokio::spawn(async move { vault.folders().move_folder(b, Some(a)).await })
        };
        let first = first.await.unwrap();
        let second = second.await.unwrap();

        assert!(first.is_ok() != second.is_ok());
        let loser = first.err().or(second.err()).unwrap();
        assert_eq!(loser.kind, ErrorKind::Validation);

        let a = folders.get_by_id(a).await.unwrap();
        let b = folders.get_by_id(b).await.unwrap();
        assert!(a.is_root() || b.is_root());

        folders.delete(if a.is_root() { a.id } else { b.id }).await.unwrap();
    }
}
