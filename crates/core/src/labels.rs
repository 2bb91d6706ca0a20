//! Display labels for codes, in the language the product ships in.

use std::borrow::Cow;

use crate::models::{
    attendance::AttendanceStatus,
    leave::{LeaveStatus, LeaveType},
    slot::Slot,
};

/// Shown in place of a badge for a pending (unresolved) slot.
pub const PENDING_PLACEHOLDER: &str = "-";

/// Shown when the backend returned no final status at all.
pub const UNREGISTERED: &str = "미등록";

/// Shown for an enrolled member without a name.
pub const UNNAMED_MEMBER: &str = "이름 없음";

pub fn slot_label(slot: Slot) -> &'static str {
    match slot {
        Slot::Morning => "아침",
        Slot::Lunch => "점심",
        Slot::Dinner => "저녁",
    }
}

/// Label for a status; codes without a translation are shown as sent.
pub fn status_label(status: &AttendanceStatus) -> &str {
    match status {
        AttendanceStatus::Present => "출석",
        AttendanceStatus::Late => "지각",
        AttendanceStatus::Absent => "결석",
        AttendanceStatus::EarlyLeave => "조퇴",
        AttendanceStatus::Excused => "공결",
        AttendanceStatus::NotChecked => "미체크",
        AttendanceStatus::Other(code) => code,
    }
}

/// Label for a raw status code; unknown codes are returned unchanged.
pub fn status_code_label(code: &str) -> Cow<'_, str> {
    let Ok(status) = code.parse::<AttendanceStatus>();
    match status {
        AttendanceStatus::Other(_) => Cow::Borrowed(code),
        known => Cow::Owned(status_label(&known).to_string()),
    }
}

/// Label for a possibly pending status.
pub fn display_status(status: Option<&AttendanceStatus>) -> &str {
    status.map(status_label).unwrap_or(PENDING_PLACEHOLDER)
}

/// Label for a member's overall status, which reads as unregistered rather than
/// pending when nothing could be derived.
pub fn display_overall_status(status: Option<&AttendanceStatus>) -> &str {
    status.map(status_label).unwrap_or(UNREGISTERED)
}

pub fn leave_type_label(leave_type: LeaveType) -> &'static str {
    match leave_type {
        LeaveType::Sick | LeaveType::SickLeave => "병가",
        LeaveType::Personal => "개인 사유",
        LeaveType::Official => "공가",
        LeaveType::EarlyLeave => "조퇴",
        LeaveType::Other => "기타",
        LeaveType::Absence => "결석/공가",
    }
}

pub fn leave_status_label(status: LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Pending => "대기중",
        LeaveStatus::Approved => "승인",
        LeaveStatus::Rejected => "반려",
        LeaveStatus::Cancelled => "취소",
    }
}

/// Badge class for an attendance status; pending slots and codes without a badge of
/// their own get the placeholder style.
pub fn badge_class(status: Option<&AttendanceStatus>) -> &'static str {
    match status {
        Some(AttendanceStatus::Present) => "badge-success",
        Some(AttendanceStatus::Late) | Some(AttendanceStatus::EarlyLeave) => "badge-warning",
        Some(AttendanceStatus::Absent) => "badge-error",
        Some(AttendanceStatus::Excused) => "badge-info",
        Some(AttendanceStatus::NotChecked) | Some(AttendanceStatus::Other(_)) | None => {
            "badge-pending"
        }
    }
}

/// Shortens a leave reason for table display, appending `...` when cut.
pub fn truncate_reason(reason: &str, max_chars: usize) -> Cow<'_, str> {
    if reason.chars().count() <= max_chars {
        Cow::Borrowed(reason)
    } else {
        let cut: String = reason.chars().take(max_chars).collect();
        Cow::Owned(format!("{}...", cut))
    }
}
