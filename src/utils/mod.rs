//! Utility modules for taskdesk.
//!
//! - [`datetime`] - Date parsing and human-readable formatting

pub mod datetime;
