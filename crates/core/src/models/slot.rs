use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{
    errors::{AttendanceError, AttendanceResult},
    models::attendance::AttendanceStatus,
};

/// One of the three fixed daily check-in slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Slot {
    Morning,
    Lunch,
    Dinner,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Lunch, Slot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Morning => "MORNING",
            Slot::Lunch => "LUNCH",
            Slot::Dinner => "DINNER",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = AttendanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MORNING" => Ok(Slot::Morning),
            "LUNCH" => Ok(Slot::Lunch),
            "DINNER" => Ok(Slot::Dinner),
            other => Err(AttendanceError::Validation(format!(
                "Unknown attendance slot: {}",
                other
            ))),
        }
    }
}

/// Minutes elapsed since midnight, ignoring seconds.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Parses a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_clock_time(value: &str) -> AttendanceResult<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| AttendanceError::Validation(format!("Invalid time of day: {}", value)))
}

/// Serde adapter for `HH:MM` times that also accepts `HH:MM:SS` from the backend.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_clock_time(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => serializer.serialize_some(&time.format("%H:%M").to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => super::super::parse_clock_time(&raw)
                    .map(Some)
                    .map_err(de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

/// Admin-configurable check-in window for a slot.
///
/// `start` opens check-in, check-ins after `standard` count as late, and nothing is
/// accepted after `deadline`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotWindow {
    #[serde(with = "clock_time")]
    pub start: NaiveTime,
    #[serde(with = "clock_time")]
    pub standard: NaiveTime,
    #[serde(with = "clock_time")]
    pub deadline: NaiveTime,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl SlotWindow {
    pub fn new(start: NaiveTime, standard: NaiveTime, deadline: NaiveTime) -> Self {
        Self {
            start,
            standard,
            deadline,
        }
    }

    /// Form defaults offered when an admin creates a configuration for `slot`.
    pub fn default_for(slot: Slot) -> Self {
        match slot {
            Slot::Morning => Self::new(hm(8, 30), hm(8, 50), hm(9, 10)),
            Slot::Lunch => Self::new(hm(11, 20), hm(12, 30), hm(13, 0)),
            Slot::Dinner => Self::new(hm(17, 30), hm(17, 50), hm(18, 0)),
        }
    }

    /// Minutes between opening and the late threshold.
    pub fn valid_minutes(&self) -> i64 {
        i64::from(minutes_since_midnight(self.standard))
            - i64::from(minutes_since_midnight(self.start))
    }

    pub fn validate(&self) -> AttendanceResult<()> {
        if self.valid_minutes() <= 0 {
            return Err(AttendanceError::Validation(
                "Check-in start must be earlier than the late threshold".to_string(),
            ));
        }
        if self.deadline < self.standard {
            return Err(AttendanceError::Validation(
                "Deadline must not be earlier than the late threshold".to_string(),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, now: NaiveTime) -> bool {
        self.start <= now && now <= self.deadline
    }

    /// Status a check-in at `at` would earn, or `None` once the window has closed.
    pub fn classify(&self, at: NaiveTime) -> Option<AttendanceStatus> {
        if at <= self.standard {
            Some(AttendanceStatus::Present)
        } else if at <= self.deadline {
            Some(AttendanceStatus::Late)
        } else {
            None
        }
    }
}

/// The configured windows for all three slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSchedule {
    pub morning: SlotWindow,
    pub lunch: SlotWindow,
    pub dinner: SlotWindow,
}

impl Default for SlotSchedule {
    fn default() -> Self {
        Self {
            morning: SlotWindow::default_for(Slot::Morning),
            lunch: SlotWindow::default_for(Slot::Lunch),
            dinner: SlotWindow::default_for(Slot::Dinner),
        }
    }
}

impl SlotSchedule {
    pub fn window(&self, slot: Slot) -> &SlotWindow {
        match slot {
            Slot::Morning => &self.morning,
            Slot::Lunch => &self.lunch,
            Slot::Dinner => &self.dinner,
        }
    }

    /// Slot whose configured window contains `now`.
    pub fn slot_at(&self, now: NaiveTime) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| self.window(*slot).contains(now))
    }
}

/// Time of day after which an unrecorded slot is shown as absent.
///
/// A single table is shared by every caller that resolves statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineTable {
    #[serde(with = "clock_time")]
    pub morning: NaiveTime,
    #[serde(with = "clock_time")]
    pub lunch: NaiveTime,
    #[serde(with = "clock_time")]
    pub dinner: NaiveTime,
}

impl Default for DeadlineTable {
    fn default() -> Self {
        Self {
            morning: hm(10, 0),
            lunch: hm(14, 0),
            dinner: hm(19, 0),
        }
    }
}

impl DeadlineTable {
    pub fn deadline(&self, slot: Slot) -> NaiveTime {
        match slot {
            Slot::Morning => self.morning,
            Slot::Lunch => self.lunch,
            Slot::Dinner => self.dinner,
        }
    }

    pub fn with_deadline(mut self, slot: Slot, deadline: NaiveTime) -> Self {
        match slot {
            Slot::Morning => self.morning = deadline,
            Slot::Lunch => self.lunch = deadline,
            Slot::Dinner => self.dinner = deadline,
        }
        self
    }
}
