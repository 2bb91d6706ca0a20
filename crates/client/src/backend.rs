use async_trait::async_trait;
use chrono::NaiveDate;

use attendance_core::{
    errors::AttendanceResult,
    models::{
        attendance::{
            AttendanceRecord, AutoCheckInRequest, CheckInRequest, CheckInResult, Enrollment,
            ExportFile, ExportFormat, UpdateAttendanceStatusRequest,
        },
        attendance_config::{
            AttendanceConfig, CreateAttendanceConfigRequest, UpdateAttendanceConfigRequest,
        },
        auth::LoginResponse,
        leave::{CreateLeaveRequest, EvidenceFile, LeaveRequest},
        member::{CreateMemberRequest, Member, UpdateMemberRequest},
        notice::{Notice, NoticePage, NoticeRequest},
        notification::Notification,
    },
};

/// Everything the console asks of the attendance backend.
///
/// Every call returns the payload with the response envelope already removed.
/// Calls that need a signed-in user use the token set through
/// [`AttendanceBackend::set_access_token`].
#[async_trait]
pub trait AttendanceBackend: Send + Sync {
    fn set_access_token(&self, token: Option<String>);

    // Authentication
    async fn login(&self, login_id: &str, password: &str) -> AttendanceResult<LoginResponse>;
    async fn logout(&self) -> AttendanceResult<()>;

    // Check-in and personal attendance
    async fn check_in(&self, request: &CheckInRequest) -> AttendanceResult<CheckInResult>;
    async fn check_in_auto(&self, request: &AutoCheckInRequest)
        -> AttendanceResult<CheckInResult>;
    async fn my_attendance(
        &self,
        member_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> AttendanceResult<AttendanceRecord>;

    // Admin attendance board
    async fn enrollments(&self, course_id: i64) -> AttendanceResult<Vec<Enrollment>>;
    async fn attendances(
        &self,
        date: NaiveDate,
        course_id: i64,
    ) -> AttendanceResult<Vec<AttendanceRecord>>;
    /// Cycles the status of an existing daily attendance row.
    async fn change_attendance_status(&self, daily_attendance_id: i64) -> AttendanceResult<()>;
    /// Same as [`AttendanceBackend::change_attendance_status`], for members without a row yet.
    async fn change_attendance_status_by_member(
        &self,
        member_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> AttendanceResult<()>;
    async fn update_attendance_status(
        &self,
        request: &UpdateAttendanceStatusRequest,
    ) -> AttendanceResult<()>;
    async fn export_attendance(
        &self,
        format: ExportFormat,
        date: NaiveDate,
        course_id: i64,
    ) -> AttendanceResult<ExportFile>;

    // Attendance configurations
    async fn attendance_configs(&self, course_id: i64) -> AttendanceResult<Vec<AttendanceConfig>>;
    async fn attendance_config(&self, id: i64) -> AttendanceResult<AttendanceConfig>;
    async fn create_attendance_config(
        &self,
        request: &CreateAttendanceConfigRequest,
    ) -> AttendanceResult<AttendanceConfig>;
    async fn update_attendance_config(
        &self,
        id: i64,
        request: &UpdateAttendanceConfigRequest,
    ) -> AttendanceResult<AttendanceConfig>;
    async fn update_auth_number(
        &self,
        id: i64,
        auth_number: &str,
    ) -> AttendanceResult<AttendanceConfig>;
    async fn delete_attendance_config(&self, id: i64) -> AttendanceResult<()>;

    // Members
    async fn members(&self) -> AttendanceResult<Vec<Member>>;
    async fn member(&self, login_id: &str) -> AttendanceResult<Member>;
    async fn create_member(&self, request: &CreateMemberRequest) -> AttendanceResult<Member>;
    async fn update_member(
        &self,
        login_id: &str,
        request: &UpdateMemberRequest,
    ) -> AttendanceResult<Member>;
    async fn delete_member(&self, login_id: &str) -> AttendanceResult<()>;
    async fn my_info(&self) -> AttendanceResult<Member>;
    async fn update_my_info(&self, request: &UpdateMemberRequest) -> AttendanceResult<Member>;

    // Leave requests
    async fn create_leave_request(
        &self,
        login_id: &str,
        request: &CreateLeaveRequest,
        evidence: Option<EvidenceFile>,
    ) -> AttendanceResult<LeaveRequest>;
    async fn my_leave_requests(&self, login_id: &str) -> AttendanceResult<Vec<LeaveRequest>>;
    async fn cancel_leave_request(&self, id: i64, login_id: &str) -> AttendanceResult<()>;
    async fn all_leave_requests(&self) -> AttendanceResult<Vec<LeaveRequest>>;
    async fn pending_leave_requests(&self) -> AttendanceResult<Vec<LeaveRequest>>;
    async fn approve_leave_request(&self, id: i64) -> AttendanceResult<()>;
    async fn reject_leave_request(&self, id: i64, reason: &str) -> AttendanceResult<()>;

    // Notices
    async fn notices(&self, page: u32, size: u32) -> AttendanceResult<NoticePage>;
    async fn notice(&self, id: i64) -> AttendanceResult<Notice>;
    async fn popup_notices(&self) -> AttendanceResult<Vec<Notice>>;
    async fn create_notice(&self, request: &NoticeRequest) -> AttendanceResult<Notice>;
    async fn update_notice(&self, id: i64, request: &NoticeRequest) -> AttendanceResult<Notice>;
    async fn delete_notice(&self, id: i64) -> AttendanceResult<()>;

    // Server-side notifications
    async fn my_notifications(&self) -> AttendanceResult<Vec<Notification>>;
    async fn unread_notifications(&self) -> AttendanceResult<Vec<Notification>>;
    async fn unread_count(&self) -> AttendanceResult<u64>;
    async fn mark_notification_read(&self, id: i64) -> AttendanceResult<()>;
    async fn mark_all_notifications_read(&self) -> AttendanceResult<()>;
}
