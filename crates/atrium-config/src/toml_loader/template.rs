//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Atrium Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Atrium"
# default_width = 1000     # used when no saved window state exists
# default_height = 800
# min_width = 640
# title_bar = "auto"       # auto, default, hidden_inset
# vibrancy = true          # macOS only
# theme_source = "light"   # system, light, dark
# spellcheck = false
# content_dir = ""       # empty = resources/web next to the executable

[window.traffic_light]
# x = 24
# y = 18

[dev]
# enabled = false          # also set by ATRIUM_ENV=development
# server_url = "http://localhost:8080"   # also set by DEV_SERVER_URL
# open_devtools = true

[storage]
# workspaces_dir = ""      # empty = <data dir>/atrium/workspaces
# window_state_file = "window-state.json"

[oauth]
# google_client_id = ""    # also set by GOOGLE_CLIENT_ID
# scopes = ["openid", "email", "profile"]
# redirect_timeout_secs = 300

[logging]
# level = "INFO"           # TRACE, DEBUG, INFO, WARNING, ERROR
# filter = "wry=warn"      # extra tracing directives, also ATRIUM_LOG
"##
    .to_string()
}
