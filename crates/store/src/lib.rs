//! # Attendance Store
//!
//! Local state the console keeps between runs: the signed-in session, the bounded list
//! of local notifications, and the day popup notices were dismissed. The store is an
//! explicit object handed to whoever needs it; it is persisted as a single JSON file,
//! or kept in memory only.

pub mod models;
pub mod notifications;

use std::path::{Path, PathBuf};

use attendance_core::models::auth::{LoginResponse, Session, SessionUser};
use chrono::{NaiveDate, Utc};
use eyre::{Result, WrapErr};
use tracing::{debug, info};
use uuid::Uuid;

use models::{LocalNotification, NewNotification, StoredState};
use notifications::{NotificationLog, DEFAULT_CAPACITY};

#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    session: Option<Session>,
    notifications: NotificationLog,
    popup_closed_on: Option<NaiveDate>,
}

impl LocalStore {
    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the store at `path`. A missing file yields an empty store; a file that
    /// cannot be parsed is an error.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_capacity(path, DEFAULT_CAPACITY).await
    }

    pub async fn open_with_capacity(path: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<StoredState>(&bytes)
                .wrap_err_with(|| format!("Corrupt store file {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No store file at {}, starting empty", path.display());
                StoredState::default()
            }
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("Failed to read {}", path.display()));
            }
        };

        info!(
            "Opened local store at {} ({} notifications)",
            path.display(),
            state.notifications.len()
        );

        Ok(Self {
            path: Some(path),
            session: state.session,
            notifications: NotificationLog::from_entries(state.notifications, capacity),
            popup_closed_on: state.popup_closed_on,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn snapshot(&self) -> StoredState {
        StoredState {
            session: self.session.clone(),
            notifications: self.notifications.list(),
            popup_closed_on: self.popup_closed_on,
        }
    }

    /// Writes the current state to disk. A no-op for in-memory stores.
    pub async fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }

        let bytes = serde_json::to_vec_pretty(&self.snapshot())?;
        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .wrap_err_with(|| format!("Failed to replace {}", path.display()))?;

        debug!("Flushed local store to {}", path.display());
        Ok(())
    }

    // Session

    pub fn save_session(&mut self, login_id: &str, response: LoginResponse) -> &Session {
        self.session.insert(Session::from_login(login_id, response))
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.access_token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn clear_session(&mut self) {
        self.session = None;
    }

    // Notifications

    pub fn notifications(&self) -> &NotificationLog {
        &self.notifications
    }

    pub fn add_notification(&mut self, notification: NewNotification) -> LocalNotification {
        self.notifications.add(notification, Utc::now()).clone()
    }

    pub fn mark_notification_read(&mut self, id: Uuid) -> bool {
        self.notifications.mark_read(id)
    }

    pub fn mark_all_notifications_read(&mut self) {
        self.notifications.mark_all_read();
    }

    pub fn remove_notification(&mut self, id: Uuid) -> bool {
        self.notifications.remove(id)
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    // Popup notices

    /// Hides popup notices for the rest of `today`.
    pub fn dismiss_popups_for(&mut self, today: NaiveDate) {
        self.popup_closed_on = Some(today);
    }

    pub fn should_show_popups(&self, today: NaiveDate) -> bool {
        self.popup_closed_on != Some(today)
    }
}
