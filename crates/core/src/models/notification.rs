use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification kinds the backend emits around leave requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    LeaveRequest,
    LeaveApproved,
    LeaveRejected,
    #[serde(other)]
    Other,
}

impl NotificationKind {
    /// Console route a notification of this kind links to.
    pub fn target_path(&self) -> Option<&'static str> {
        match self {
            NotificationKind::LeaveRequest => Some("/admin/leaves"),
            NotificationKind::LeaveApproved | NotificationKind::LeaveRejected => {
                Some("/my-leaves")
            }
            NotificationKind::Other => None,
        }
    }
}

/// A notification stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCount {
    #[serde(default, alias = "unreadCount")]
    pub count: u64,
}

/// The unread counter is sent either as a bare number or as `{ "count": n }`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum UnreadCountBody {
    Number(u64),
    Object(UnreadCount),
}

impl UnreadCountBody {
    pub fn count(self) -> u64 {
        match self {
            UnreadCountBody::Number(count) => count,
            UnreadCountBody::Object(body) => body.count,
        }
    }
}
