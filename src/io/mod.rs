//! Input/output utilities.

/// CSV export of completed runs.
pub mod export;
