//! Native file pickers for database files.
//!
//! `rfd` dialogs block, so they run on the tokio blocking pool.

use std::path::PathBuf;

use atrium_common::PlatformError;

/// Extensions offered by the database file pickers.
pub const DB_EXTENSIONS: &[&str] = &["db", "sqlite", "affine"];

/// Ask the user for an existing database file. `None` when canceled.
pub async fn pick_db_file(start_dir: Option<PathBuf>) -> Result<Option<PathBuf>, PlatformError> {
    tokio::task::spawn_blocking(move || {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Load Database")
            .add_filter("Database", DB_EXTENSIONS);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_file()
    })
    .await
    .map_err(|e| PlatformError::DialogError(format!("file dialog task failed: {e}")))
}

/// Ask the user where to save a database file. `None` when canceled.
pub async fn save_db_file(
    start_dir: Option<PathBuf>,
    file_name: &str,
) -> Result<Option<PathBuf>, PlatformError> {
    let file_name = ensure_db_extension(file_name);
    tokio::task::spawn_blocking(move || {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Save Database")
            .add_filter("Database", DB_EXTENSIONS)
            .set_file_name(&file_name);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        dialog.save_file()
    })
    .await
    .map_err(|e| PlatformError::DialogError(format!("file dialog task failed: {e}")))
}

/// Suggested file name with a database extension appended if missing.
pub fn ensure_db_extension(file_name: &str) -> String {
    let has_ext = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| DB_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if has_ext {
        file_name.to_owned()
    } else {
        format!("{file_name}.db")
    }
}
