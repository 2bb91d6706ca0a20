//! # Slot & Status Resolution
//!
//! The backend only records a slot status once a member checks in (or an admin sets
//! one). Until then the slot is empty, and the console has to decide what to show:
//!
//! - a recorded status is always shown as-is;
//! - an empty slot whose deadline has passed for the queried date is shown as `ABSENT`;
//! - any other empty slot is pending and rendered as a placeholder.
//!
//! Current time is always passed in explicitly, so a whole board is resolved against
//! one instant.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    attendance::{AttendanceRecord, AttendanceStatus},
    slot::{minutes_since_midnight, DeadlineTable, Slot},
};

/// Quick-check windows in minutes since midnight, inclusive at both ends.
///
/// These are fixed and independent of admin-configured [`SlotWindow`]s.
///
/// [`SlotWindow`]: crate::models::slot::SlotWindow
pub const CHECK_IN_WINDOWS: [(Slot, u32, u32); 3] = [
    (Slot::Morning, 520, 560),
    (Slot::Lunch, 730, 770),
    (Slot::Dinner, 1050, 1090),
];

/// Slot whose quick-check window contains `now`, if any.
pub fn current_slot(now: NaiveTime) -> Option<Slot> {
    let t = minutes_since_midnight(now);
    CHECK_IN_WINDOWS
        .iter()
        .find(|(_, start, end)| (*start..=*end).contains(&t))
        .map(|(slot, _, _)| *slot)
}

/// Derives the overall status from already-resolved slot statuses.
///
/// An authoritative status from the backend wins. Otherwise only the non-pending
/// slots are considered: all absent gives `ABSENT`, some absent gives `EARLY_LEAVE`
/// (used as the partial-attendance marker), anything else stays unresolved.
pub fn resolve_overall_status(
    authoritative: Option<AttendanceStatus>,
    slots: [Option<AttendanceStatus>; 3],
) -> Option<AttendanceStatus> {
    if authoritative.is_some() {
        return authoritative;
    }

    let collected: Vec<AttendanceStatus> = slots.into_iter().flatten().collect();
    let absent = collected
        .iter()
        .filter(|s| **s == AttendanceStatus::Absent)
        .count();

    if !collected.is_empty() && absent == collected.len() {
        Some(AttendanceStatus::Absent)
    } else if absent > 0 {
        Some(AttendanceStatus::EarlyLeave)
    } else {
        None
    }
}

/// Statuses to display for one attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAttendance {
    pub morning: Option<AttendanceStatus>,
    pub lunch: Option<AttendanceStatus>,
    pub dinner: Option<AttendanceStatus>,
    pub overall: Option<AttendanceStatus>,
}

impl ResolvedAttendance {
    pub fn slot(&self, slot: Slot) -> Option<&AttendanceStatus> {
        match slot {
            Slot::Morning => self.morning.as_ref(),
            Slot::Lunch => self.lunch.as_ref(),
            Slot::Dinner => self.dinner.as_ref(),
        }
    }
}

/// Resolves displayed statuses against a shared [`DeadlineTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusResolver {
    deadlines: DeadlineTable,
}

impl StatusResolver {
    pub fn new(deadlines: DeadlineTable) -> Self {
        Self { deadlines }
    }

    pub fn deadlines(&self) -> &DeadlineTable {
        &self.deadlines
    }

    /// Whether `slot` has closed for `query_date`, seen from `today` at `now`.
    ///
    /// Past dates are fully elapsed, future dates not at all; today compares `now`
    /// strictly against the slot's deadline.
    pub fn is_past_deadline(
        &self,
        slot: Slot,
        query_date: NaiveDate,
        today: NaiveDate,
        now: NaiveTime,
    ) -> bool {
        if query_date < today {
            return true;
        }
        if query_date > today {
            return false;
        }
        now > self.deadlines.deadline(slot)
    }

    /// Status to display for one slot. Never overrides `recorded` (including the
    /// backend's `NONE`), and only ever fills the gap with `ABSENT`.
    pub fn resolve_status(
        &self,
        recorded: Option<AttendanceStatus>,
        slot: Slot,
        query_date: NaiveDate,
        at: NaiveDateTime,
    ) -> Option<AttendanceStatus> {
        if recorded.is_some() {
            return recorded;
        }
        if self.is_past_deadline(slot, query_date, at.date(), at.time()) {
            Some(AttendanceStatus::Absent)
        } else {
            None
        }
    }

    /// Resolves every slot of `record`, then its overall status.
    pub fn resolve_record(
        &self,
        record: &AttendanceRecord,
        query_date: NaiveDate,
        at: NaiveDateTime,
    ) -> ResolvedAttendance {
        let slots = Slot::ALL
            .map(|slot| self.resolve_status(record.status(slot).cloned(), slot, query_date, at));
        let overall = resolve_overall_status(record.overall_status.clone(), slots.clone());
        let [morning, lunch, dinner] = slots;

        ResolvedAttendance {
            morning,
            lunch,
            dinner,
            overall,
        }
    }
}
