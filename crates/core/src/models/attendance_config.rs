use chrono::{NaiveDate, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{
    errors::AttendanceResult,
    models::{
        attendance::validate_auth_number,
        slot::{clock_time, Slot, SlotWindow},
    },
};

/// Per-course, per-day check-in configuration managed by admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceConfig {
    pub id: i64,
    #[serde(default)]
    pub course_id: Option<i64>,
    pub target_date: NaiveDate,
    #[serde(rename = "type")]
    pub slot: Slot,
    #[serde(default)]
    pub auth_number: String,
    #[serde(default, with = "clock_time::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "clock_time")]
    pub standard_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub deadline: NaiveTime,
    #[serde(default)]
    pub valid_minutes: Option<i64>,
}

impl AttendanceConfig {
    /// Opening time, derived from `standard_time - valid_minutes` when the backend
    /// did not store one. A negative span, or one reaching back past midnight,
    /// yields `None`.
    pub fn start(&self) -> Option<NaiveTime> {
        self.start_time.or_else(|| {
            let minutes = self.valid_minutes.filter(|minutes| *minutes >= 0)?;
            let span = TimeDelta::try_minutes(minutes)?;
            let (start, wrapped) = self.standard_time.overflowing_sub_signed(span);
            (wrapped == 0).then_some(start)
        })
    }

    pub fn window(&self) -> Option<SlotWindow> {
        self.start()
            .map(|start| SlotWindow::new(start, self.standard_time, self.deadline))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceConfigRequest {
    pub course_id: i64,
    pub target_date: NaiveDate,
    #[serde(rename = "type")]
    pub slot: Slot,
    pub auth_number: String,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub standard_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub deadline: NaiveTime,
    pub valid_minutes: i64,
}

impl CreateAttendanceConfigRequest {
    /// Validates the auth number and window, deriving `valid_minutes` from the window.
    pub fn new(
        course_id: i64,
        target_date: NaiveDate,
        slot: Slot,
        auth_number: impl Into<String>,
        window: SlotWindow,
    ) -> AttendanceResult<Self> {
        let auth_number = auth_number.into();
        validate_auth_number(&auth_number)?;
        window.validate()?;

        Ok(Self {
            course_id,
            target_date,
            slot,
            auth_number,
            start_time: window.start,
            standard_time: window.standard,
            deadline: window.deadline,
            valid_minutes: window.valid_minutes(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceConfigRequest {
    #[serde(
        default,
        with = "clock_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveTime>,
    #[serde(
        default,
        with = "clock_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub standard_time: Option<NaiveTime>,
    #[serde(
        default,
        with = "clock_time::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_number: Option<String>,
}

impl UpdateAttendanceConfigRequest {
    pub fn validate(&self) -> AttendanceResult<()> {
        if let Some(auth_number) = &self.auth_number {
            validate_auth_number(auth_number)?;
        }
        if let (Some(start), Some(standard), Some(deadline)) =
            (self.start_time, self.standard_time, self.deadline)
        {
            SlotWindow::new(start, standard, deadline).validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthNumberRequest {
    pub auth_number: String,
}
