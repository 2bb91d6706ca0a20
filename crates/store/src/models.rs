use attendance_core::models::{auth::Session, notification::NotificationKind};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A notification raised locally by the console, newest first in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalNotification {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub kind: Option<NotificationKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub kind: Option<NotificationKind>,
}

/// Everything the store writes to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub notifications: Vec<LocalNotification>,
    #[serde(default)]
    pub popup_closed_on: Option<NaiveDate>,
}
