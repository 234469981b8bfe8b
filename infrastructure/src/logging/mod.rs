//! Logging infrastructure — structured deliberation audit logging.
//!
//! Provides [`JsonlDeliberationLogger`], a JSONL file writer that appends
//! one record per completed (or failed) deliberation.

mod jsonl_logger;

pub use jsonl_logger::JsonlDeliberationLogger;
