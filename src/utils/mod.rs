//! Utility functions and helpers
//!
//! This module contains timestamp utilities, atomic file writes and JSONL
//! loading.

pub mod atomic;
pub mod jsonl;
pub mod time;

pub use atomic::{atomic_write_with, cleanup_temp_files};
pub use jsonl::read_jsonl;
pub use time::{current_timestamp, format_date_range};
