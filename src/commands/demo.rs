//! Scripted session against the sample drive.

use cloudvault_core::result::AppResult;
use cloudvault_entity::file::UploadBlob;
use cloudvault_entity::folder::{CreateFolder, UpdateFolder};
use cloudvault_service::{BatchSummary, Vault};

use super::rows::{FileRow, FolderRow};
use crate::output::{self, OutputFormat};

/// Runs upload, move, star, share, trash, and cascade steps in order and
/// prints what each one produced.
pub async fn execute(vault: &Vault, format: OutputFormat) -> AppResult<()> {
    // ── Step 1: Upload ───────────────────────────────────────────
    let report = vault
        .uploads()
        .upload(UploadBlob::new("report.pdf", 2048, "application/pdf"), None)
        .await?;
    output::print_success(&format!("Uploaded '{}' to the root", report.name));

    let batch = vault
        .uploads()
        .upload_batch(
            vec![
                UploadBlob::new("cover.png", 48_213, "image/png"),
                UploadBlob::new("notes.txt", 912, "text/plain"),
            ],
            None,
        )
        .await;
    let summary = BatchSummary::from(&batch);
    output::print_success(&format!("Batch upload committed {} files", summary.completed));

    // ── Step 2: Organize ─────────────────────────────────────────
    let inbox = vault
        .folders()
        .create(CreateFolder::new("Inbox", None))
        .await?;
    let archive = vault
        .folders()
        .create(CreateFolder::new("Archive", Some(inbox.id)))
        .await?;
    vault.files().move_to_folder(report.id, Some(inbox.id)).await?;
    vault.files().toggle_star(report.id).await?;
    output::print_success(&format!("Moved and starred '{}' in '{}'", report.name, inbox.path));

    let renamed = vault
        .folders()
        .update(inbox.id, UpdateFolder::rename("Incoming"))
        .await?;
    let archive = vault.folders().get_by_id(archive.id).await?;
    output::print_success(&format!(
        "Renamed '{}' to '{}'; child path is now '{}'",
        inbox.name, renamed.name, archive.path
    ));

    // ── Step 3: Share ────────────────────────────────────────────
    let link = vault.share_file(report.id, None).await?;
    output::print_success(&format!("Shared '{}' at {}", report.name, link.url));

    let view = vault.folder_view(Some(inbox.id)).await?;
    match format {
        OutputFormat::Json => output::print_json(&view),
        OutputFormat::Table => {
            let folders: Vec<FolderRow> = view.folders.iter().map(FolderRow::from).collect();
            let files: Vec<FileRow> = view.files.iter().map(FileRow::from).collect();
            output::print_list(&folders, format);
            output::print_list(&files, format);
        }
    }

    // ── Step 4: Trash and restore ────────────────────────────────
    vault.files().delete(report.id).await?;
    output::print_success(&format!(
        "Trash now holds {} files",
        vault.files().get_deleted().await?.len()
    ));
    vault.restore_file(report.id).await?;
    output::print_success(&format!("Restored '{}'", report.name));

    // ── Step 5: Cascade delete ───────────────────────────────────
    let removed = vault.delete_folder(inbox.id).await?;
    output::print_success(&format!(
        "Deleted '{}' and {} sub-folders; its files went to the trash",
        renamed.name,
        removed.len().saturating_sub(1)
    ));

    let purged = vault.empty_trash().await?;
    if purged.is_success() {
        output::print_success(&format!("Emptied trash ({} files)", purged.completed.len()));
    } else {
        output::print_warning("Emptying the trash stopped early");
    }

    vault.reset().await;
    output::print_success("Vault reset to the sample data");

    Ok(())
}
