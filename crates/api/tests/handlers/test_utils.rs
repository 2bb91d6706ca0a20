use std::sync::Arc;

use attendance_api::{app, ApiState};
use attendance_client::mock::MockBackend;
use attendance_core::{
    clock::FixedClock,
    models::{auth::LoginResponse, member::Role},
    resolver::StatusResolver,
};
use attendance_store::LocalStore;
use axum_test::TestServer;
use chrono::{NaiveDate, NaiveTime};

pub const COURSE_ID: i64 = 1;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// The day every test runs on unless it pins another time.
pub fn today() -> NaiveDate {
    date(2025, 3, 10)
}

pub struct TestContext {
    pub backend: MockBackend,
    pub clock: FixedClock,
    pub store: LocalStore,
}

impl TestContext {
    /// Signed out, 11:00 on [`today`].
    pub fn new() -> Self {
        Self {
            backend: MockBackend::new(),
            clock: FixedClock::at(today(), time(11, 0)),
            store: LocalStore::in_memory(),
        }
    }

    pub fn at(mut self, hour: u32, minute: u32) -> Self {
        self.clock = FixedClock::at(today(), time(hour, minute));
        self
    }

    pub fn signed_in_as(mut self, login_id: &str, member_id: i64, role: Role) -> Self {
        self.store.save_session(
            login_id,
            LoginResponse {
                access_token: format!("token-{}", login_id),
                refresh_token: None,
                id: member_id,
                login_id: Some(login_id.to_string()),
                name: format!("Member {}", member_id),
                role,
            },
        );
        self
    }

    pub fn student(self) -> Self {
        self.signed_in_as("student01", 7, Role::Student)
    }

    pub fn admin(self) -> Self {
        self.signed_in_as("admin", 1, Role::Admin)
    }

    pub fn state(mut self) -> ApiState {
        self.backend.expect_set_access_token().returning(|_| ());
        ApiState::new(
            Arc::new(self.backend),
            StatusResolver::default(),
            Arc::new(self.clock),
            self.store,
            COURSE_ID,
        )
    }

    pub fn server(self) -> TestServer {
        server_for(self.state())
    }
}

pub fn server_for(state: ApiState) -> TestServer {
    TestServer::new(app(Arc::new(state))).unwrap()
}
