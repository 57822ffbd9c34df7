//! The drive's fixed views: recent, shared, trash, starred, expired links.

use std::collections::HashMap;

use clap::Args;

use cloudvault_core::result::AppResult;
use cloudvault_core::traits::Clock;
use cloudvault_service::Vault;

use super::rows::{FileRow, ShareRow, TrashRow};
use crate::output::{self, OutputFormat};

/// Arguments for views that support name filtering
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Only show files whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for `recent`
#[derive(Debug, Args)]
pub struct RecentArgs {
    /// Maximum number of files (defaults to `vault.recent_limit`)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only show files whose name contains this text
    #[arg(short, long)]
    pub search: Option<String>,
}

fn matches(name_query: Option<&String>, name: &str) -> bool {
    name_query.is_none_or(|q| name.to_lowercase().contains(&q.to_lowercase()))
}

/// Most recently modified files.
pub async fn recent(vault: &Vault, args: &RecentArgs, format: OutputFormat) -> AppResult<()> {
    let limit = args.limit.unwrap_or(vault.config().vault.recent_limit);
    let rows: Vec<FileRow> = vault
        .search()
        .recent(limit)
        .await?
        .iter()
        .filter(|f| matches(args.search.as_ref(), &f.name))
        .map(FileRow::from)
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Files shared by link, with link details.
pub async fn shared(vault: &Vault, args: &SearchArgs, format: OutputFormat) -> AppResult<()> {
    let now = vault.clock().now();
    let rows: Vec<ShareRow> = vault
        .shared_files()
        .await?
        .iter()
        .filter(|s| matches(args.search.as_ref(), &s.file.name))
        .map(|s| ShareRow::from_shared(s, now))
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Files in the trash.
pub async fn trash(vault: &Vault, args: &SearchArgs, format: OutputFormat) -> AppResult<()> {
    let rows: Vec<TrashRow> = vault
        .files()
        .get_deleted()
        .await?
        .iter()
        .filter(|f| matches(args.search.as_ref(), &f.name))
        .map(TrashRow::from)
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Starred files.
pub async fn starred(vault: &Vault, format: OutputFormat) -> AppResult<()> {
    let rows: Vec<FileRow> = vault
        .search()
        .starred()
        .await?
        .iter()
        .map(FileRow::from)
        .collect();

    output::print_list(&rows, format);
    Ok(())
}

/// Share links past their expiry.
pub async fn expired(vault: &Vault, format: OutputFormat) -> AppResult<()> {
    let now = vault.clock().now();
    let names: HashMap<_, _> = vault
        .files()
        .get_all()
        .await?
        .into_iter()
        .map(|f| (f.id, f.name))
        .collect();

    let rows: Vec<ShareRow> = vault
        .shares()
        .get_expired()
        .await?
        .iter()
        .map(|link| {
            let label = names
                .get(&link.file_id)
                .cloned()
                .unwrap_or_else(|| link.file_id.to_string());
            ShareRow::new(label, link, now)
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
