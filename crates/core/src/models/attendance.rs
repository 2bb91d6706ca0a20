use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{convert::Infallible, fmt, str::FromStr};

use crate::{errors::AttendanceError, models::member::Member, models::slot::Slot};

/// A status recorded by the backend for one slot, or for a whole day.
///
/// `NONE` is the backend's own "not checked" mark and counts as recorded. Codes this
/// console does not know are kept verbatim in [`AttendanceStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    EarlyLeave,
    Excused,
    NotChecked,
    Other(String),
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Late => "LATE",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::EarlyLeave => "EARLY_LEAVE",
            AttendanceStatus::Excused => "EXCUSED",
            AttendanceStatus::NotChecked => "NONE",
            AttendanceStatus::Other(code) => code,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Ok(match code.to_ascii_uppercase().as_str() {
            "PRESENT" => AttendanceStatus::Present,
            "LATE" => AttendanceStatus::Late,
            "ABSENT" => AttendanceStatus::Absent,
            "EARLY_LEAVE" | "LEAVE" => AttendanceStatus::EarlyLeave,
            "EXCUSED" | "OFFICIAL_LEAVE" => AttendanceStatus::Excused,
            "NONE" => AttendanceStatus::NotChecked,
            _ => AttendanceStatus::Other(code.to_string()),
        })
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        let Ok(status) = code.parse::<AttendanceStatus>();
        Ok(status)
    }
}

/// Serde adapter for slot statuses where `null` and `""` mean "not recorded yet".
pub mod recorded_status {
    use super::AttendanceStatus;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        status: &Option<AttendanceStatus>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        status.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<AttendanceStatus>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => {
                let Ok(status) = raw.parse::<AttendanceStatus>();
                Ok(Some(status))
            }
            _ => Ok(None),
        }
    }
}

/// Daily attendance aggregate for one member in one course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default)]
    pub daily_attendance_id: Option<i64>,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default, alias = "workDate")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "recorded_status")]
    pub morning_status: Option<AttendanceStatus>,
    #[serde(default, with = "recorded_status")]
    pub lunch_status: Option<AttendanceStatus>,
    #[serde(default, with = "recorded_status")]
    pub dinner_status: Option<AttendanceStatus>,
    #[serde(default, with = "recorded_status", alias = "finalStatus")]
    pub overall_status: Option<AttendanceStatus>,
    #[serde(default)]
    pub morning_check_time: Option<String>,
    #[serde(default)]
    pub lunch_check_time: Option<String>,
    #[serde(default)]
    pub dinner_check_time: Option<String>,
}

impl AttendanceRecord {
    pub fn status(&self, slot: Slot) -> Option<&AttendanceStatus> {
        match slot {
            Slot::Morning => self.morning_status.as_ref(),
            Slot::Lunch => self.lunch_status.as_ref(),
            Slot::Dinner => self.dinner_status.as_ref(),
        }
    }

    pub fn check_time(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Morning => self.morning_check_time.as_deref(),
            Slot::Lunch => self.lunch_check_time.as_deref(),
            Slot::Dinner => self.dinner_check_time.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub member_id: i64,
    pub course_id: i64,
    #[serde(rename = "type")]
    pub slot: Slot,
    pub input_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoCheckInRequest {
    pub member_id: i64,
    pub course_id: i64,
    pub input_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub check_time: Option<String>,
}

/// Admin override of individual slot statuses for one member and day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceStatusRequest {
    pub member_id: i64,
    pub course_id: i64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub morning_status: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_status: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner_status: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    #[serde(default)]
    pub course_name: String,
}

/// A member's enrollment in a course, as returned by the admin enrollment listing.
///
/// Older backend builds flatten the member into `memberId`/`memberName`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default)]
    pub member: Option<Member>,
    #[serde(default)]
    pub member_id: Option<i64>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub course: Option<Course>,
}

impl Enrollment {
    pub fn member_id(&self) -> Option<i64> {
        self.member.as_ref().map(|m| m.id).or(self.member_id)
    }

    pub fn member_name(&self) -> Option<&str> {
        self.member
            .as_ref()
            .map(|m| m.name.as_str())
            .or(self.member_name.as_deref())
    }

    pub fn course_name(&self) -> Option<&str> {
        self.course.as_ref().map(|c| c.course_name.as_str())
    }
}

/// Spreadsheet flavor offered by the attendance export endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
}

impl ExportFormat {
    pub fn as_query(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("attendance_{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            other => Err(AttendanceError::Validation(format!(
                "Unknown export format: {}",
                other
            ))),
        }
    }
}

/// A downloaded export, with the file name the browser would have offered.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Returns an error unless `input` is exactly four ASCII digits.
pub fn validate_auth_number(input: &str) -> Result<(), AttendanceError> {
    if input.len() == 4 && input.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AttendanceError::Validation(
            "Authentication number must be exactly four digits".to_string(),
        ))
    }
}
