pub mod admin;
pub mod attendance;
pub mod auth;
pub mod health;
pub mod leave;
pub mod notices;
pub mod notifications;
