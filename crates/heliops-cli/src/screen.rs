//! Generic list screen: fetch, filter, add/edit/delete, refetch
//!
//! One `ListScreen<R>` replaces the per-entity screen pattern. It holds the
//! last successful fetch and moves through `Idle -> Loading -> Loaded | Failed`
//! on every load, including the reload that follows each mutation.

use crate::api::{ApiClient, ListQuery, Resource};
use crate::error::{ApiErrorKind, CliError, Result};
use crate::session::SessionStore;
use heliops_common::FleetData;
use std::future::Future;
use tracing::{debug, info, warn};

/// Where a screen is in its fetch cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    Loaded,
    Failed(Failure),
}

/// What the person at the screen should be told
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Token rejected; the session must be cleared and the user must log in
    SessionExpired,
    PermissionDenied,
    NotFound,
    Invalid,
    /// Anything else; retrying may help
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

/// Map an error to its user-facing category and banner text
pub fn classify(err: &CliError) -> Failure {
    let (kind, message) = match err.api_kind() {
        Some(ApiErrorKind::Unauthorized) => (
            FailureKind::SessionExpired,
            "Your session has expired. Please log in again.".to_string(),
        ),
        Some(ApiErrorKind::Forbidden) => (
            FailureKind::PermissionDenied,
            "You do not have permission to perform this action.".to_string(),
        ),
        Some(ApiErrorKind::NotFound) => (
            FailureKind::NotFound,
            "The requested record no longer exists.".to_string(),
        ),
        Some(ApiErrorKind::Validation) => (
            FailureKind::Invalid,
            match err {
                CliError::Api(api) => format!("The server rejected the data: {}", api.message),
                _ => "The server rejected the data.".to_string(),
            },
        ),
        _ => (
            FailureKind::Unavailable,
            "The operation failed. Check your connection and try again.".to_string(),
        ),
    };

    Failure { kind, message }
}

/// Banner text for `err`. An expired session is cleared here so the next
/// command starts from the login prompt.
pub fn user_message(err: &CliError, session: &mut SessionStore) -> String {
    let failure = classify(err);

    if failure.kind == FailureKind::SessionExpired {
        if let Err(e) = session.logout() {
            warn!(error = %e, "Could not clear expired session");
        }
    }

    failure.message
}

/// Client-side search and dropdown filter over the last fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Only records owned by this pilot
    pub pilot: Option<String>,
}

impl Filter {
    /// `directory` resolves the names a record's row shows in place of ids
    pub fn matches<R: Resource>(&self, record: &R, directory: &FleetData) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => record
                .search_text(directory)
                .to_lowercase()
                .contains(&term.to_lowercase()),
        };

        let pilot_ok = match self.pilot.as_deref() {
            None => true,
            Some(wanted) => record.owner_pilot_id() == Some(wanted),
        };

        let category_ok = match self.category.as_deref() {
            None | Some("") | Some("all") => true,
            Some(wanted) => record
                .category()
                .map(|c| c.eq_ignore_ascii_case(wanted))
                .unwrap_or(false),
        };

        search_ok && category_ok && pilot_ok
    }
}

/// Blocking yes/no question shown before destructive actions
pub trait Confirm {
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Terminal prompt, defaulting to "no"
pub struct PromptConfirm;

impl Confirm for PromptConfirm {
    fn confirm(&self, message: &str) -> Result<bool> {
        Ok(inquire::Confirm::new(message).with_default(false).prompt()?)
    }
}

/// Answers yes without asking (`--yes`)
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _message: &str) -> Result<bool> {
        Ok(true)
    }
}

pub struct ListScreen<'a, R: Resource> {
    api: &'a ApiClient,
    query: ListQuery,
    records: Vec<R>,
    directory: FleetData,
    state: ScreenState,
}

impl<'a, R: Resource> ListScreen<'a, R> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self::with_query(api, ListQuery::new())
    }

    /// Screen whose fetch carries server-side filters, e.g. `pilotId`
    pub fn with_query(api: &'a ApiClient, query: ListQuery) -> Self {
        Self {
            api,
            query,
            records: Vec::new(),
            directory: FleetData::default(),
            state: ScreenState::Idle,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// Records from the last successful fetch
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Pilots, aircraft and clients fetched alongside the list when rows
    /// refer to them; empty otherwise
    pub fn directory(&self) -> &FleetData {
        &self.directory
    }

    async fn fetch(&self) -> Result<(Vec<R>, Option<FleetData>)> {
        if R::NEEDS_DIRECTORY {
            let (records, directory) =
                tokio::try_join!(self.api.list::<R>(&self.query), self.api.fleet_directory())?;
            Ok((records, Some(directory)))
        } else {
            Ok((self.api.list::<R>(&self.query).await?, None))
        }
    }

    /// Fetch the full list. On failure the previous records are kept.
    pub async fn load(&mut self) -> Result<&[R]> {
        self.state = ScreenState::Loading;
        debug!(resource = R::LABEL, "Loading list");

        match self.fetch().await {
            Ok((records, directory)) => {
                self.records = records;
                if let Some(directory) = directory {
                    self.directory = directory;
                }
                self.state = ScreenState::Loaded;
                Ok(&self.records)
            },
            Err(e) => {
                self.state = ScreenState::Failed(classify(&e));
                Err(e)
            },
        }
    }

    pub fn filtered(&self, filter: &Filter) -> Vec<&R> {
        self.records
            .iter()
            .filter(|r| filter.matches(*r, &self.directory))
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub async fn create(&mut self, record: &R) -> Result<R> {
        let created = self.api.create(record).await?;
        info!(resource = R::LABEL, id = created.id(), "Created");
        self.load().await?;
        Ok(created)
    }

    pub async fn update(&mut self, id: &str, record: &R) -> Result<R> {
        let updated = self.api.update(id, record).await?;
        info!(resource = R::LABEL, id, "Updated");
        self.load().await?;
        Ok(updated)
    }

    /// Ask for confirmation, delete, then reload. Returns false when the
    /// person declined; nothing is sent in that case.
    pub async fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool> {
        let prompt = format!("Delete {} '{}'? This cannot be undone.", R::LABEL, id);
        if !confirm.confirm(&prompt)? {
            debug!(resource = R::LABEL, id, "Delete declined");
            return Ok(false);
        }

        self.api.delete::<R>(id).await?;
        info!(resource = R::LABEL, id, "Deleted");
        self.load().await?;
        Ok(true)
    }

    /// Run `upload`, store its URL on `record`, then create (no `id`) or
    /// update. A failed upload aborts before anything is submitted.
    pub async fn save_with_attachment<F>(
        &mut self,
        mut record: R,
        id: Option<&str>,
        upload: F,
    ) -> Result<R>
    where
        F: Future<Output = Result<String>>,
    {
        if !record.clone().attach(String::new()) {
            return Err(CliError::config(format!("a {} has no attachment field", R::LABEL)));
        }

        let url = upload.await?;
        record.attach(url);

        match id {
            Some(id) => self.update(id, &record).await,
            None => self.create(&record).await,
        }
    }
}
