//! Operating-system services for Atrium: directories, native dialogs,
//! opening folders and URLs, crash reports.

pub mod crash_report;
pub mod dialogs;
pub mod open;
pub mod paths;

pub use crash_report::{crash_report_dir, sanitize_secrets, write_crash_report};
pub use dialogs::{ensure_db_extension, pick_db_file, save_db_file, DB_EXTENSIONS};
pub use open::{open_folder, open_url};
pub use paths::{
    config_dir, config_file, data_dir, ensure_dirs, env_file, window_state_file, workspaces_dir,
};
