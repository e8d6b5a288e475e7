//! Application context shared by every command
//!
//! Built once in `main` and passed by reference, this is the only place that
//! wires configuration, the persisted session, the API client and object
//! storage together.

use crate::api::ApiClient;
use crate::config::Config;
use crate::display::Theme;
use crate::error::{CliError, Result};
use crate::screen;
use crate::session::SessionStore;
use crate::storage::Storage;
use heliops_common::models::User;
use heliops_common::{fixture, FleetData};
use tracing::debug;

pub struct AppContext {
    pub config: Config,
    pub session: SessionStore,
    pub api: ApiClient,
    storage: Option<Storage>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let session = SessionStore::open(config.session_path()?)?;
        let api = ApiClient::from_config(&config, session.token().map(str::to_string))?;
        let storage = config.storage.clone().map(Storage::new);

        debug!(
            api_url = %config.api_url,
            logged_in = session.is_logged_in(),
            storage = storage.is_some(),
            "Context ready"
        );

        Ok(Self {
            config,
            session,
            api,
            storage,
        })
    }

    /// Fail early when no token is stored
    pub fn require_login(&self) -> Result<()> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(CliError::NotLoggedIn)
        }
    }

    pub fn storage(&self) -> Result<&Storage> {
        self.storage.as_ref().ok_or_else(|| {
            CliError::config("object storage is not configured (set HELIOPS_STORAGE_BUCKET)")
        })
    }

    pub fn theme(&self) -> Theme {
        Theme::new(self.session.dark_mode())
    }

    pub fn sign_in(&mut self, token: &str, user: &User) -> Result<()> {
        self.session.login(token, user)?;
        self.api.set_token(Some(token.to_string()));
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<()> {
        self.session.logout()?;
        self.api.set_token(None);
        Ok(())
    }

    /// User-facing text for a failed command; clears an expired session
    pub fn report(&mut self, err: &CliError) -> String {
        let message = screen::user_message(err, &mut self.session);
        if !self.session.is_logged_in() {
            self.api.set_token(None);
        }
        message
    }

    /// Snapshot for the fleet math: the built-in dataset offline, the live
    /// API otherwise
    pub async fn fleet_data(&self, offline: bool) -> Result<FleetData> {
        if offline {
            debug!("Using built-in fleet dataset");
            return Ok(fixture::dataset());
        }

        self.require_login()?;
        self.api.fleet_snapshot().await
    }
}
