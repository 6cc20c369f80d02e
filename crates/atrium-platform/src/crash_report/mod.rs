//! Crash reports written from the panic hook.
//!
//! Reports land in `data_dir()/crash-reports` as JSON, with OAuth codes,
//! tokens and similar secrets redacted.

mod report;
mod sanitize;

pub use report::{crash_report_dir, write_crash_report};
pub use sanitize::sanitize_secrets;
