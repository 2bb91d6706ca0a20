pub mod attendance;
pub mod attendance_config;
pub mod auth;
pub mod leave;
pub mod member;
pub mod notice;
pub mod notification;
pub mod slot;
