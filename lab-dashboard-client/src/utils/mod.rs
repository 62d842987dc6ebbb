//! Utility modules.

/// Timestamp serialization helpers for wire types.
pub mod datetime;

/// Per-endpoint policy for response bodies in the debug log.
pub mod log_sanitizer;
