//! Folder browsing commands.

use clap::Args;

use cloudvault_core::result::AppResult;
use cloudvault_core::types::FolderId;
use cloudvault_entity::folder::FolderNode;
use cloudvault_service::Vault;

use super::rows::{FileRow, FolderRow};
use crate::output::{self, OutputFormat};

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder to list (root when omitted)
    #[arg(long)]
    pub folder: Option<FolderId>,

    /// Only show entries whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

/// List one folder: breadcrumbs, sub-folders, and files.
pub async fn list(vault: &Vault, args: &LsArgs, format: OutputFormat) -> AppResult<()> {
    let mut view = vault.folder_view(args.folder).await?;

    if let Some(query) = &args.search {
        view.folders.retain(|f| f.matches_query(query));
        view.files.retain(|f| f.matches_query(query));
    }

    if format == OutputFormat::Json {
        output::print_json(&view);
        return Ok(());
    }

    let trail: Vec<&str> = view.breadcrumbs.iter().map(|f| f.name.as_str()).collect();
    println!("/{}", trail.join("/"));

    let folders: Vec<FolderRow> = view.folders.iter().map(FolderRow::from).collect();
    let files: Vec<FileRow> = view.files.iter().map(FileRow::from).collect();

    output::print_heading("Folders", format);
    output::print_list(&folders, format);
    output::print_heading("Files", format);
    output::print_list(&files, format);

    Ok(())
}

/// Print the folder tree.
pub async fn tree(vault: &Vault, format: OutputFormat) -> AppResult<()> {
    let tree = vault.tree().get_tree().await?;

    match format {
        OutputFormat::Json => output::print_json(&tree),
        OutputFormat::Table => {
            println!("/ ({} folders)", tree.total_folders);
            for node in &tree.roots {
                print_node(node, 1);
            }
        }
    }

    Ok(())
}

fn print_node(node: &FolderNode, depth: usize) {
    println!(
        "{}{} ({} items)",
        "  ".repeat(depth),
        node.folder.name,
        node.folder.child_count
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
