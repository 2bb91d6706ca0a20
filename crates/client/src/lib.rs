//! # Attendance Client
//!
//! Talks to the attendance backend's REST API. [`AttendanceBackend`] is the seam the
//! console and CLI are written against; [`HttpBackend`] implements it with reqwest and
//! [`mock::MockBackend`] stands in for it in tests.
//!
//! Responses are unwrapped from their `{ "data": ... }` envelope here, so callers only
//! ever see typed payloads or an [`AttendanceError`].
//!
//! [`AttendanceError`]: attendance_core::errors::AttendanceError

pub mod backend;
pub mod config;
pub mod http;
pub mod mock;
pub mod poller;

pub use backend::AttendanceBackend;
pub use config::ClientConfig;
pub use http::HttpBackend;
