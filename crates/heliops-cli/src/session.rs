//! Persisted session: bearer token, signed-in user, theme preference
//!
//! Stored as a flat string map under fixed keys, mirroring how a browser
//! keeps them in local storage. The user record is kept as serialized JSON.

use crate::error::{CliError, Result};
use heliops_common::models::User;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl SessionStore {
    /// Open the store at `path`. A missing file is an empty session.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw).map_err(|e| {
                CliError::session(format!("'{}' is not a valid session file: {}", path.display(), e))
            })?
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = entries.len(), "Session opened");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.entries.get(TOKEN_KEY).map(String::as_str)
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// The stored user; an unreadable record is treated as absent
    pub fn current_user(&self) -> Option<User> {
        let raw = self.entries.get(USER_KEY)?;
        match serde_json::from_str(raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user record is unreadable");
                None
            },
        }
    }

    /// Persist credentials returned by a successful login
    pub fn login(&mut self, token: &str, user: &User) -> Result<()> {
        self.entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.entries
            .insert(USER_KEY.to_string(), serde_json::to_string(user)?);
        self.save()?;

        info!(user_id = %user.id, role = %user.role, "Session stored");
        Ok(())
    }

    /// Clear stored credentials. Preferences survive.
    pub fn logout(&mut self) -> Result<()> {
        let had_token = self.entries.remove(TOKEN_KEY).is_some();
        self.entries.remove(USER_KEY);
        self.save()?;

        if had_token {
            info!("Session cleared");
        }
        Ok(())
    }

    pub fn dark_mode(&self) -> bool {
        self.entries
            .get(DARK_MODE_KEY)
            .map(|v| v == "true")
            .unwrap_or(false)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<()> {
        self.entries
            .insert(DARK_MODE_KEY.to_string(), enabled.to_string());
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path)?;

        // `mode` only applies to new files; tighten an existing one before the token lands in it
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(contents.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use heliops_common::models::UserRole;

    fn pilot() -> User {
        User {
            id: "p1".into(),
            name: "Carlos Mendoza".into(),
            email: "carlos@heliops.example".into(),
            role: UserRole::Pilot,
            license_number: Some("CPL-H 10482".into()),
            flight_hours: Some(3250.5),
            certifications: vec!["AS350".into()],
        }
    }

    #[test]
    fn test_missing_file_is_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json")).unwrap();

        assert!(!store.is_logged_in());
        assert!(store.current_user().is_none());
        assert!(!store.dark_mode());
    }

    #[test]
    fn test_login_persists_under_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = SessionStore::open(&path).unwrap();
        store.login("tok-123", &pilot()).unwrap();

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.get(TOKEN_KEY).unwrap(), "tok-123");
        assert!(raw.get(USER_KEY).unwrap().contains("\"licenseNumber\""));

        let reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.token(), Some("tok-123"));
        assert_eq!(reopened.current_user().unwrap(), pilot());
    }

    #[test]
    fn test_logout_keeps_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::open(&path).unwrap();
        store.set_dark_mode(true).unwrap();
        store.login("tok", &pilot()).unwrap();
        store.logout().unwrap();

        let reopened = SessionStore::open(&path).unwrap();
        assert!(!reopened.is_logged_in());
        assert!(reopened.current_user().is_none());
        assert!(reopened.dark_mode());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;

        let mut store = SessionStore::open(&path).unwrap();
        store.login("jwt-abc", &pilot()).unwrap();
        assert_eq!(mode(&path), 0o600);

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        store.set_dark_mode(true).unwrap();
        assert_eq!(mode(&path), 0o600);
    }

    #[test]
    fn test_corrupt_user_record_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"token":"t","user":"{not json"}"#).unwrap();

        let store = SessionStore::open(&path).unwrap();
        assert!(store.is_logged_in());
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(SessionStore::open(&path), Err(CliError::Session(_))));
    }
}
