use std::{sync::RwLock, time::Duration};

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::{Result, WrapErr};
use reqwest::{multipart, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use attendance_core::{
    envelope::unwrap_body,
    errors::{AttendanceError, AttendanceResult},
    models::{
        attendance::{
            AttendanceRecord, AutoCheckInRequest, CheckInRequest, CheckInResult, Enrollment,
            ExportFile, ExportFormat, UpdateAttendanceStatusRequest,
        },
        attendance_config::{
            AttendanceConfig, CreateAttendanceConfigRequest, UpdateAttendanceConfigRequest,
            UpdateAuthNumberRequest,
        },
        auth::{LoginRequest, LoginResponse},
        leave::{CreateLeaveRequest, EvidenceFile, LeaveRequest},
        member::{CreateMemberRequest, Member, UpdateMemberRequest},
        notice::{Notice, NoticeListing, NoticePage, NoticeRequest},
        notification::{Notification, UnreadCountBody},
    },
};

use crate::{backend::AttendanceBackend, config::ClientConfig};

/// Header the backend uses to identify the student on leave endpoints.
const STUDENT_LOGIN_ID: &str = "Student-Login-Id";

/// [`AttendanceBackend`] over the backend's REST API.
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match self.token.read().ok().and_then(|t| t.clone()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AttendanceResult<T> {
        let response = execute(builder).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        unwrap_body(&bytes)
    }

    /// Sends a request whose response body carries nothing the console needs.
    async fn send_unit(&self, builder: RequestBuilder) -> AttendanceResult<()> {
        execute(builder).await.map(|_| ())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AttendanceResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AttendanceResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn patch_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AttendanceResult<T> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }
}

async fn execute(builder: RequestBuilder) -> AttendanceResult<Response> {
    let response = builder.send().await.map_err(transport_error)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    Err(status_error(status, &body))
}

fn transport_error(e: reqwest::Error) -> AttendanceError {
    AttendanceError::Backend(eyre::Report::new(e).wrap_err("Request to attendance backend failed"))
}

/// Maps a non-success backend response to the console's error taxonomy, preferring
/// the backend's own `message` when it sent one.
pub fn status_error(status: StatusCode, body: &[u8]) -> AttendanceError {
    let message = error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unexpected response")
            .to_string()
    });

    match status {
        StatusCode::BAD_REQUEST => AttendanceError::Validation(message),
        StatusCode::UNAUTHORIZED => AttendanceError::Authentication(message),
        StatusCode::FORBIDDEN => AttendanceError::Authorization(message),
        StatusCode::NOT_FOUND => AttendanceError::NotFound(message),
        _ => AttendanceError::Backend(eyre::eyre!("{} ({})", message, status.as_u16())),
    }
}

fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        return ["message", "error"]
            .iter()
            .find_map(|key| value.get(key)?.as_str())
            .map(str::to_string);
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    (!text.is_empty()).then_some(text)
}

#[async_trait]
impl AttendanceBackend for HttpBackend {
    fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    async fn login(&self, login_id: &str, password: &str) -> AttendanceResult<LoginResponse> {
        let request = LoginRequest {
            login_id: login_id.to_string(),
            password: password.to_string(),
        };
        self.post_json("/auth/login", &request).await
    }

    async fn logout(&self) -> AttendanceResult<()> {
        self.send_unit(self.request(Method::POST, "/auth/logout"))
            .await
    }

    async fn check_in(&self, request: &CheckInRequest) -> AttendanceResult<CheckInResult> {
        self.post_json("/attendances", request).await
    }

    async fn check_in_auto(
        &self,
        request: &AutoCheckInRequest,
    ) -> AttendanceResult<CheckInResult> {
        self.post_json("/attendances/auto", request).await
    }

    async fn my_attendance(
        &self,
        member_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> AttendanceResult<AttendanceRecord> {
        let builder = self.request(Method::GET, "/attendances/me").query(&[
            ("memberId", member_id.to_string()),
            ("courseId", course_id.to_string()),
            ("date", date.to_string()),
        ]);
        self.send(builder).await
    }

    async fn enrollments(&self, course_id: i64) -> AttendanceResult<Vec<Enrollment>> {
        let builder = self
            .request(Method::GET, "/admin/enrollment")
            .query(&[("courseId", course_id)]);
        self.send(builder).await
    }

    async fn attendances(
        &self,
        date: NaiveDate,
        course_id: i64,
    ) -> AttendanceResult<Vec<AttendanceRecord>> {
        let builder = self
            .request(Method::GET, "/admin/attendances")
            .query(&[("date", date.to_string()), ("courseId", course_id.to_string())]);
        self.send(builder).await
    }

    async fn change_attendance_status(&self, daily_attendance_id: i64) -> AttendanceResult<()> {
        let path = format!("/attendances/admin/{}", daily_attendance_id);
        self.send_unit(self.request(Method::PATCH, &path)).await
    }

    async fn change_attendance_status_by_member(
        &self,
        member_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> AttendanceResult<()> {
        let path = format!("/attendances/admin/member/{}", member_id);
        let builder = self
            .request(Method::PATCH, &path)
            .query(&[("courseId", course_id.to_string()), ("date", date.to_string())]);
        self.send_unit(builder).await
    }

    async fn update_attendance_status(
        &self,
        request: &UpdateAttendanceStatusRequest,
    ) -> AttendanceResult<()> {
        let builder = self
            .request(Method::PUT, "/attendances/admin/status")
            .json(request);
        self.send_unit(builder).await
    }

    async fn export_attendance(
        &self,
        format: ExportFormat,
        date: NaiveDate,
        course_id: i64,
    ) -> AttendanceResult<ExportFile> {
        let builder = self.request(Method::GET, "/attendances/admin/export").query(&[
            ("downloadType", format.as_query().to_string()),
            ("workDate", date.to_string()),
            ("courseId", course_id.to_string()),
        ]);
        let response = execute(builder).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;

        Ok(ExportFile {
            file_name: format.file_name(date),
            content_type: format.content_type(),
            bytes: bytes.to_vec(),
        })
    }

    async fn attendance_configs(&self, course_id: i64) -> AttendanceResult<Vec<AttendanceConfig>> {
        let builder = self
            .request(Method::GET, "/admin/attendance-configs")
            .query(&[("courseId", course_id)]);
        self.send(builder).await
    }

    async fn attendance_config(&self, id: i64) -> AttendanceResult<AttendanceConfig> {
        self.get(&format!("/admin/attendance-configs/{}", id)).await
    }

    async fn create_attendance_config(
        &self,
        request: &CreateAttendanceConfigRequest,
    ) -> AttendanceResult<AttendanceConfig> {
        self.post_json("/admin/attendance-configs", request).await
    }

    async fn update_attendance_config(
        &self,
        id: i64,
        request: &UpdateAttendanceConfigRequest,
    ) -> AttendanceResult<AttendanceConfig> {
        self.patch_json(&format!("/admin/attendance-configs/{}", id), request)
            .await
    }

    async fn update_auth_number(
        &self,
        id: i64,
        auth_number: &str,
    ) -> AttendanceResult<AttendanceConfig> {
        let request = UpdateAuthNumberRequest {
            auth_number: auth_number.to_string(),
        };
        self.patch_json(
            &format!("/admin/attendance-configs/{}/auth-number", id),
            &request,
        )
        .await
    }

    async fn delete_attendance_config(&self, id: i64) -> AttendanceResult<()> {
        let path = format!("/admin/attendance-configs/{}", id);
        self.send_unit(self.request(Method::DELETE, &path)).await
    }

    async fn members(&self) -> AttendanceResult<Vec<Member>> {
        self.get("/admin/members").await
    }

    async fn member(&self, login_id: &str) -> AttendanceResult<Member> {
        self.get(&format!("/admin/members/{}", login_id)).await
    }

    async fn create_member(&self, request: &CreateMemberRequest) -> AttendanceResult<Member> {
        self.post_json("/admin/members", request).await
    }

    async fn update_member(
        &self,
        login_id: &str,
        request: &UpdateMemberRequest,
    ) -> AttendanceResult<Member> {
        self.patch_json(&format!("/admin/members/{}", login_id), request)
            .await
    }

    async fn delete_member(&self, login_id: &str) -> AttendanceResult<()> {
        let path = format!("/admin/members/{}", login_id);
        self.send_unit(self.request(Method::DELETE, &path)).await
    }

    async fn my_info(&self) -> AttendanceResult<Member> {
        self.get("/members/me").await
    }

    async fn update_my_info(&self, request: &UpdateMemberRequest) -> AttendanceResult<Member> {
        self.patch_json("/members/me", request).await
    }

    async fn create_leave_request(
        &self,
        login_id: &str,
        request: &CreateLeaveRequest,
        evidence: Option<EvidenceFile>,
    ) -> AttendanceResult<LeaveRequest> {
        request.validate()?;

        let mut form = multipart::Form::new()
            .text("leaveDate", request.leave_date.to_string())
            .text("reason", request.reason.clone())
            .text("leaveType", request.leave_type.as_str());

        if let Some(file) = evidence {
            file.validate()?;
            let part = multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)
                .map_err(transport_error)?;
            form = form.part("evidenceFile", part);
        }

        let builder = self
            .request(Method::POST, "/leave-requests")
            .header(STUDENT_LOGIN_ID, login_id)
            .multipart(form);
        self.send(builder).await
    }

    async fn my_leave_requests(&self, login_id: &str) -> AttendanceResult<Vec<LeaveRequest>> {
        let builder = self
            .request(Method::GET, "/leave-requests/me")
            .header(STUDENT_LOGIN_ID, login_id);
        self.send(builder).await
    }

    async fn cancel_leave_request(&self, id: i64, login_id: &str) -> AttendanceResult<()> {
        let builder = self
            .request(Method::DELETE, &format!("/leave-requests/{}", id))
            .header(STUDENT_LOGIN_ID, login_id);
        self.send_unit(builder).await
    }

    async fn all_leave_requests(&self) -> AttendanceResult<Vec<LeaveRequest>> {
        self.get("/leave-requests/admin").await
    }

    async fn pending_leave_requests(&self) -> AttendanceResult<Vec<LeaveRequest>> {
        self.get("/leave-requests/admin/pending").await
    }

    async fn approve_leave_request(&self, id: i64) -> AttendanceResult<()> {
        let path = format!("/leave-requests/admin/{}/approve", id);
        self.send_unit(self.request(Method::PATCH, &path)).await
    }

    async fn reject_leave_request(&self, id: i64, reason: &str) -> AttendanceResult<()> {
        let builder = self
            .request(Method::PATCH, &format!("/leave-requests/admin/{}/reject", id))
            .query(&[("reason", reason)]);
        self.send_unit(builder).await
    }

    async fn notices(&self, page: u32, size: u32) -> AttendanceResult<NoticePage> {
        let builder = self.request(Method::GET, "/notices").query(&[
            ("page", page.to_string()),
            ("size", size.to_string()),
            ("sort", "createdAt,desc".to_string()),
        ]);
        let listing: NoticeListing = self.send(builder).await?;
        Ok(listing.into_page())
    }

    async fn notice(&self, id: i64) -> AttendanceResult<Notice> {
        self.get(&format!("/notices/{}", id)).await
    }

    async fn popup_notices(&self) -> AttendanceResult<Vec<Notice>> {
        self.get("/notices/popups").await
    }

    async fn create_notice(&self, request: &NoticeRequest) -> AttendanceResult<Notice> {
        self.post_json("/admin/notices", request).await
    }

    async fn update_notice(&self, id: i64, request: &NoticeRequest) -> AttendanceResult<Notice> {
        let builder = self
            .request(Method::PUT, &format!("/admin/notices/{}", id))
            .json(request);
        self.send(builder).await
    }

    async fn delete_notice(&self, id: i64) -> AttendanceResult<()> {
        let path = format!("/admin/notices/{}", id);
        self.send_unit(self.request(Method::DELETE, &path)).await
    }

    async fn my_notifications(&self) -> AttendanceResult<Vec<Notification>> {
        self.get("/notifications/me").await
    }

    async fn unread_notifications(&self) -> AttendanceResult<Vec<Notification>> {
        self.get("/notifications/me/unread").await
    }

    async fn unread_count(&self) -> AttendanceResult<u64> {
        let body: UnreadCountBody = self.get("/notifications/me/unread-count").await?;
        Ok(body.count())
    }

    async fn mark_notification_read(&self, id: i64) -> AttendanceResult<()> {
        let path = format!("/notifications/{}/read", id);
        self.send_unit(self.request(Method::PATCH, &path)).await
    }

    async fn mark_all_notifications_read(&self) -> AttendanceResult<()> {
        self.send_unit(self.request(Method::PATCH, "/notifications/me/read-all"))
            .await
    }
}
