//! # Attendance Core
//!
//! Domain types shared by every attendance console crate: the daily check-in slots,
//! recorded and resolved attendance statuses, backend wire shapes, display labels,
//! and the error taxonomy.
//!
//! The [`resolver`] module holds the only decision logic in the system: which slot is
//! open right now, and what status to display for a slot the backend has not recorded.

/// Injected wall-clock source
pub mod clock;
/// Response envelope unwrapping for backend payloads
pub mod envelope;
/// Error taxonomy shared by the client, store and console
pub mod errors;
/// Display label lookup tables
pub mod labels;
/// Backend wire shapes and domain types
pub mod models;
/// Slot and status resolution
pub mod resolver;
