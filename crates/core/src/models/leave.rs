use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::{AttendanceError, AttendanceResult};

/// Largest evidence attachment accepted with a leave request.
pub const MAX_EVIDENCE_BYTES: usize = 10 * 1024 * 1024;

/// MIME types accepted for leave evidence.
pub const EVIDENCE_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    Sick,
    Personal,
    Official,
    EarlyLeave,
    Other,
    SickLeave,
    Absence,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Sick => "SICK",
            LeaveType::Personal => "PERSONAL",
            LeaveType::Official => "OFFICIAL",
            LeaveType::EarlyLeave => "EARLY_LEAVE",
            LeaveType::Other => "OTHER",
            LeaveType::SickLeave => "SICK_LEAVE",
            LeaveType::Absence => "ABSENCE",
        }
    }
}

impl FromStr for LeaveType {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SICK" => Ok(LeaveType::Sick),
            "PERSONAL" => Ok(LeaveType::Personal),
            "OFFICIAL" => Ok(LeaveType::Official),
            "EARLY_LEAVE" => Ok(LeaveType::EarlyLeave),
            "OTHER" => Ok(LeaveType::Other),
            "SICK_LEAVE" => Ok(LeaveType::SickLeave),
            "ABSENCE" => Ok(LeaveType::Absence),
            other => Err(AttendanceError::Validation(format!(
                "Unknown leave type: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
            LeaveStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(LeaveStatus::Pending),
            "APPROVED" => Ok(LeaveStatus::Approved),
            "REJECTED" => Ok(LeaveStatus::Rejected),
            "CANCELLED" => Ok(LeaveStatus::Cancelled),
            other => Err(AttendanceError::Validation(format!(
                "Unknown leave status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: i64,
    #[serde(default)]
    pub student_name: Option<String>,
    pub leave_type: LeaveType,
    #[serde(default, alias = "leaveDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub evidence_file_name: Option<String>,
    #[serde(default)]
    pub reject_reason: Option<String>,
}

impl LeaveRequest {
    /// Only requests still awaiting review can be withdrawn by the student.
    pub fn is_cancellable(&self) -> bool {
        self.status == LeaveStatus::Pending
    }

    fn sort_key(&self) -> Option<DateTime<Utc>> {
        self.created_at.or_else(|| {
            self.start_date
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|d| d.and_utc())
        })
    }
}

/// Orders requests newest first, by creation time falling back to the leave date.
pub fn sort_newest_first(requests: &mut [LeaveRequest]) {
    requests.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}

/// Status filter offered on the admin leave screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl LeaveFilter {
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        match self {
            LeaveFilter::All => true,
            LeaveFilter::Pending => request.status == LeaveStatus::Pending,
            LeaveFilter::Approved => request.status == LeaveStatus::Approved,
            LeaveFilter::Rejected => request.status == LeaveStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    pub leave_date: NaiveDate,
    pub leave_type: LeaveType,
    pub reason: String,
}

impl CreateLeaveRequest {
    pub fn validate(&self) -> AttendanceResult<()> {
        if self.reason.trim().is_empty() {
            return Err(AttendanceError::Validation(
                "A reason is required for a leave request".to_string(),
            ));
        }
        Ok(())
    }
}

/// A file attached to a leave request as supporting evidence.
#[derive(Debug, Clone)]
pub struct EvidenceFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl EvidenceFile {
    pub fn validate(&self) -> AttendanceResult<()> {
        if !EVIDENCE_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(AttendanceError::Validation(
                "Only JPEG, PNG or PDF files can be attached".to_string(),
            ));
        }
        if self.bytes.len() > MAX_EVIDENCE_BYTES {
            return Err(AttendanceError::Validation(
                "Evidence files must be 10MB or smaller".to_string(),
            ));
        }
        Ok(())
    }

    /// Guesses the MIME type from the file extension.
    pub fn content_type_for(file_name: &str) -> Option<&'static str> {
        let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "pdf" => Some("application/pdf"),
            _ => None,
        }
    }
}
