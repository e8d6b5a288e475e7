//! `heliops upload` command implementation
//!
//! Uploads a file to object storage and prints its public URL. With
//! `--attach-to`, the URL is then stored on an existing record; if the
//! upload fails the record is left untouched. Once the record is saved, the
//! file it previously pointed at is removed from the bucket.

use crate::api::Resource;
use crate::commands::ResourceKind;
use crate::context::AppContext;
use crate::error::Result;
use crate::screen::ListScreen;
use crate::storage::Storage;
use crate::with_resource;
use colored::Colorize;
use std::path::Path;
use tracing::{info, warn};

pub async fn run(
    ctx: &AppContext,
    folder: &str,
    file: &Path,
    attach_to: Option<(ResourceKind, String)>,
) -> Result<()> {
    let storage = ctx.storage()?;

    let Some((kind, id)) = attach_to else {
        let url = storage.upload_path(folder, file).await?;
        println!("{} Uploaded {}", "✓".green(), url.cyan());
        return Ok(());
    };

    ctx.require_login()?;
    with_resource!(kind, R => attach::<R>(ctx, storage, folder, file, &id).await)
}

async fn attach<R: Resource>(
    ctx: &AppContext,
    storage: &Storage,
    folder: &str,
    file: &Path,
    id: &str,
) -> Result<()> {
    let record: R = ctx.api.get(id).await?;
    let replaced = record.attachment().and_then(|url| storage.key_from_url(url));

    let mut screen = ListScreen::<R>::new(&ctx.api);
    let saved = screen
        .save_with_attachment(record, Some(id), storage.upload_path(folder, file))
        .await?;

    if let Some(key) = replaced {
        // The record already points at the new file; a leftover object is not fatal.
        match storage.delete(&key).await {
            Ok(()) => info!(key = %key, "Removed replaced attachment"),
            Err(e) => warn!(key = %key, error = %e, "Could not remove replaced attachment"),
        }
    }

    println!(
        "{} Attached {} to {} {}",
        "✓".green(),
        file.display(),
        R::LABEL,
        saved.id().cyan()
    );
    Ok(())
}
