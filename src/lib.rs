//! Rule-based battery dispatch engine for household energy storage.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Dispatch engine, decision policy, and schedule assembly modules.
pub mod dispatch;
pub mod feed;
pub mod io;
pub mod report;
