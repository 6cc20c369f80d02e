//! Hand a folder or URL to the operating system.

use std::ffi::OsStr;
use std::path::Path;

use atrium_common::PlatformError;
use tracing::info;

/// Open `path` in the platform file manager.
pub fn open_folder(path: &Path) -> Result<(), PlatformError> {
    if !path.is_dir() {
        return Err(PlatformError::OpenError {
            target: path.display().to_string(),
            reason: "not a directory".into(),
        });
    }
    launch(path.as_os_str(), &path.display().to_string())?;
    info!(path = %path.display(), "opened folder");
    Ok(())
}

/// Open `url` in the default browser. Only http(s) URLs are accepted.
pub fn open_url(url: &str) -> Result<(), PlatformError> {
    let url = browsable(url)?;
    launch(OsStr::new(url), url)?;
    info!("opened url in browser");
    Ok(())
}

/// `url` unchanged when it is http(s).
fn browsable(url: &str) -> Result<&str, PlatformError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(url)
    } else {
        Err(PlatformError::OpenError {
            target: url.into(),
            reason: "only http(s) URLs can be opened".into(),
        })
    }
}

fn launch(target: &OsStr, display: &str) -> Result<(), PlatformError> {
    open::that_detached(target).map_err(|e| PlatformError::OpenError {
        target: display.into(),
        reason: e.to_string(),
    })
}
