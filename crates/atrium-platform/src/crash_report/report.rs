use std::backtrace::Backtrace;
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};

use atrium_common::PlatformError;

use crate::paths::data_dir;

use super::sanitize::sanitize_secrets;

/// Directory crash reports are written to, `data_dir()/crash-reports`.
pub fn crash_report_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("crash-reports"))
}

/// Writes a crash report for `info` and returns its path.
///
/// Runs inside the panic hook: never panics, and any failure yields `None`.
/// On Unix the report is readable by its owner only.
pub fn write_crash_report(info: &PanicHookInfo) -> Option<PathBuf> {
    let dir = crash_report_dir().ok()?;
    let location = info.location().map(|loc| {
        serde_json::json!({
            "file": loc.file(),
            "line": loc.line(),
            "column": loc.column(),
        })
    });
    write_report_to(&dir, &panic_message(info), location)
}

fn panic_message(info: &PanicHookInfo) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn write_report_to(
    dir: &Path,
    message: &str,
    location: Option<serde_json::Value>,
) -> Option<PathBuf> {
    let now = chrono::Utc::now();
    let path = dir.join(format!(
        "crash_{}_{}.json",
        now.format("%Y%m%d_%H%M%S"),
        std::process::id()
    ));

    let backtrace = Backtrace::force_capture().to_string();
    let report = serde_json::json!({
        "timestamp": now.to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "panic_message": sanitize_secrets(message),
        "location": location,
        "backtrace": sanitize_secrets(&backtrace),
    });

    std::fs::create_dir_all(dir).ok()?;
    std::fs::write(&path, serde_json::to_string_pretty(&report).ok()?).ok()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600));
    }

    Some(path)
}
