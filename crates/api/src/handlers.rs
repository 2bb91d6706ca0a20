pub mod admin;
pub mod attendance;
pub mod auth;
pub mod configs;
pub mod leave;
pub mod members;
pub mod notices;
pub mod notifications;
