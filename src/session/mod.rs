//! Generation session: owns the text-to-surface state across edits.

/// Session state machine: debounce, generations, status, exports.
pub mod insignia_session;
/// Session configuration.
pub mod opts;
