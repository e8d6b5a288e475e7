//! `heliops list|show|create|update|delete` command implementations
//!
//! One generic code path per verb, instantiated for every entity through
//! [`with_resource!`](crate::with_resource).

use crate::api::{ListQuery, Resource};
use crate::commands::ResourceKind;
use crate::context::AppContext;
use crate::display;
use crate::error::{CliError, Result};
use crate::screen::{AssumeYes, Confirm, Filter, ListScreen, PromptConfirm};
use crate::with_resource;
use chrono::Local;
use colored::Colorize;
use heliops_common::FleetData;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Options for `heliops list`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Only records of this pilot (flights and pilot records)
    pub pilot: Option<String>,
}

/// `--pilot` is only meaningful where a record belongs to a pilot
pub fn check_pilot_filter(kind: ResourceKind, options: &ListOptions) -> Result<()> {
    if options.pilot.is_some() && !kind.has_pilot() {
        return Err(CliError::config(
            "--pilot applies to flights, qualifications, medical certificates and training",
        ));
    }
    Ok(())
}

/// Server-side filters: the library searches and categorizes on the
/// backend, pilot records filter by `pilotId`. Everything else fetches all.
pub fn server_query(kind: ResourceKind, options: &ListOptions) -> ListQuery {
    let mut query = ListQuery::new();

    if kind == ResourceKind::Library {
        query = query
            .param_opt("category", options.category.as_deref())
            .param_opt("search", options.search.as_deref());
    }

    if kind.is_pilot_record() {
        query = query.param_opt("pilotId", options.pilot.as_deref());
    }

    query
}

pub async fn list(ctx: &AppContext, kind: ResourceKind, options: ListOptions) -> Result<()> {
    check_pilot_filter(kind, &options)?;
    ctx.require_login()?;
    with_resource!(kind, R => list_as::<R>(ctx, kind, &options).await)
}

async fn list_as<R: Resource>(ctx: &AppContext, kind: ResourceKind, options: &ListOptions) -> Result<()> {
    let mut screen = ListScreen::<R>::with_query(&ctx.api, server_query(kind, options));
    screen.load().await?;

    let filter = Filter {
        search: options.search.clone(),
        category: options.category.clone(),
        pilot: options.pilot.clone(),
    };
    let shown = screen.filtered(&filter);
    debug!(fetched = screen.records().len(), shown = shown.len(), "Filtered");

    if shown.is_empty() {
        println!("No {} records found.", R::LABEL);
        return Ok(());
    }

    let today = Local::now().date_naive();
    println!(
        "{}",
        display::records_table(&shown, screen.directory(), ctx.theme(), today)
    );
    println!(
        "Showing {} of {} {} records",
        shown.len(),
        screen.records().len(),
        R::LABEL
    );
    Ok(())
}

pub async fn show(ctx: &AppContext, kind: ResourceKind, id: &str) -> Result<()> {
    ctx.require_login()?;
    with_resource!(kind, R => {
        let record: R = ctx.api.get(id).await?;
        let directory = if R::NEEDS_DIRECTORY {
            ctx.api.fleet_directory().await?
        } else {
            FleetData::default()
        };
        println!("{}", display::record_detail(&record, &directory, ctx.theme()));
        Ok(())
    })
}

/// Read a record from a JSON file
pub fn read_record<R: DeserializeOwned>(path: &Path) -> Result<R> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Object-storage folder for files attached to new `R` records
fn attachment_folder<R: Resource>() -> &'static str {
    R::PATH.trim_start_matches('/')
}

/// Create a record from `data`. With `attach`, the file is uploaded first and
/// its URL stored on the record; a failed upload creates nothing.
pub async fn create(
    ctx: &AppContext,
    kind: ResourceKind,
    data: &Path,
    attach: Option<&Path>,
) -> Result<()> {
    ctx.require_login()?;
    with_resource!(kind, R => {
        let record: R = read_record(data)?;
        let mut screen = ListScreen::<R>::new(&ctx.api);
        let created = match attach {
            Some(file) => {
                let storage = ctx.storage()?;
                let upload = storage.upload_path(attachment_folder::<R>(), file);
                screen.save_with_attachment(record, None, upload).await?
            },
            None => screen.create(&record).await?,
        };

        println!("{} Created {} {}", "✓".green(), R::LABEL, created.id().cyan());
        Ok(())
    })
}

pub async fn update(ctx: &AppContext, kind: ResourceKind, id: &str, data: &Path) -> Result<()> {
    ctx.require_login()?;
    with_resource!(kind, R => {
        let record: R = read_record(data)?;
        let mut screen = ListScreen::<R>::new(&ctx.api);
        screen.update(id, &record).await?;

        println!("{} Updated {} {}", "✓".green(), R::LABEL, id.cyan());
        Ok(())
    })
}

pub async fn delete(ctx: &AppContext, kind: ResourceKind, id: &str, yes: bool) -> Result<()> {
    ctx.require_login()?;

    let confirm: &dyn Confirm = if yes { &AssumeYes } else { &PromptConfirm };

    with_resource!(kind, R => {
        let mut screen = ListScreen::<R>::new(&ctx.api);
        if screen.delete(id, confirm).await? {
            println!("{} Deleted {} {}", "✓".green(), R::LABEL, id.cyan());
        } else {
            println!("Deletion cancelled.");
        }
        Ok(())
    })
}
