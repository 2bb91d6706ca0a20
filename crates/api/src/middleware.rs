/// Error to HTTP response mapping
pub mod error_handling;
/// Session lookups for handlers that need a signed-in user
pub mod session;
