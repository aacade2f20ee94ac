//! Stable identifiers for actions and decision states.
//!
//! These strings appear in rule files, reports, and `resguard explain`. Never rename them.

// Actions
pub const ACTION_ALERT: &str = "alert";
pub const ACTION_DELETE: &str = "delete";
pub const ACTION_TAG: &str = "tag";
pub const ACTION_STOP: &str = "stop";
pub const ACTION_ARCHIVE: &str = "archive";

// Decision states
pub const STATE_AUTO_EXECUTABLE: &str = "auto_executable";
pub const STATE_PENDING_APPROVAL: &str = "pending_approval";
pub const STATE_BLOCKED_BY_DEPENDENCY: &str = "blocked_by_dependency";
pub const STATE_EXECUTED: &str = "executed";
pub const STATE_REJECTED: &str = "rejected";

// Profiles
pub const PROFILE_STANDARD: &str = "standard";
pub const PROFILE_CAUTIOUS: &str = "cautious";
