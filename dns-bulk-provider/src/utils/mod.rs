//! Utility modules.

/// Timestamp (de)serialization for record metadata.
pub mod datetime;

/// Keeps record contents and tokens out of logs.
pub mod log_sanitizer;
