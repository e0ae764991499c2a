//! Audit logging for expense changes
//!
//! Every add and delete is appended to a line-delimited JSON log with a
//! snapshot of the affected expense.
//!
//! - `AuditEntry`: a single entry with timestamp, operation and snapshots.
//! - `AuditLogger`: appends entries to the log file and reads them back.

pub mod entry;
pub mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
