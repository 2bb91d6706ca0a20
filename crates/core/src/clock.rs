use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::errors::{AttendanceError, AttendanceResult};

/// Time zone the attendance product operates in unless configured otherwise.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Seoul;

/// Source of the current local date and time.
///
/// Resolution code never reads the system clock directly; it is handed a `Clock` so that
/// every evaluation within one request sees the same instant and tests can pin it.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    fn time(&self) -> NaiveTime {
        self.now().time()
    }
}

/// Wall clock in a fixed time zone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Builds a clock from an IANA zone name such as `Asia/Seoul`.
    pub fn from_name(name: &str) -> AttendanceResult<Self> {
        let tz = name
            .parse::<Tz>()
            .map_err(|e| AttendanceError::Validation(format!("Invalid time zone {}: {}", name, e)))?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
