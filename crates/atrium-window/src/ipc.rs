//! Content side of the host channel.
//!
//! Messages flow in both directions:
//! - **content -> host**: `window.ipc.postMessage(JSON.stringify(frame))`,
//!   picked up by the WebView's IPC handler and forwarded into the content
//!   [`Endpoint`](atrium_rpc::Endpoint).
//! - **host -> content**: `webview.evaluate_script(js_deliver_message(..))`.
//!
//! The initialization script installs `window.appInfo` and `window.apis`.
//! Calls made before the host hands over the channel
//! ([`HANDSHAKE_CHANNEL`]) are queued and flushed on handoff.

use atrium_bridge::Capability;
use atrium_common::AppInfo;
use serde_json::Value;

/// Name under which the host announces the channel to content.
pub const HANDSHAKE_CHANNEL: &str = "main-world-port";

const BRIDGE_SCRIPT: &str = r#"
(function() {
    if (window.__atrium) { return; }
    var pending = {};
    var queue = [];
    var nextId = 1;
    var connected = false;

    function post(frame) {
        if (connected) {
            window.ipc.postMessage(JSON.stringify(frame));
        } else {
            queue.push(frame);
        }
    }

    function call(method, params) {
        return new Promise(function(resolve, reject) {
            var id = nextId++;
            pending[id] = { resolve: resolve, reject: reject };
            post({ type: "call", id: id, method: method, params: params });
        });
    }

    function notify(method, params) {
        post({ type: "notify", method: method, params: params });
    }

    function fail(id, error) {
        var err = new Error(error && error.message ? error.message : "call failed");
        err.code = error && error.code;
        pending[id].reject(err);
    }

    window.__atrium = {
        _port: function(name) {
            if (name !== {{handshake}} || connected) { return; }
            connected = true;
            var queued = queue;
            queue = [];
            for (var i = 0; i < queued.length; i++) { post(queued[i]); }
            window.dispatchEvent(new CustomEvent("atrium:connected", { detail: name }));
        },
        _deliver: function(frame) {
            if (!frame || typeof frame !== "object") { return; }
            if (frame.type === "result" && pending[frame.id]) {
                pending[frame.id].resolve(frame.value === undefined ? null : frame.value);
                delete pending[frame.id];
            } else if (frame.type === "error" && pending[frame.id]) {
                fail(frame.id, frame.error);
                delete pending[frame.id];
            } else if (frame.type === "call") {
                post({
                    type: "error",
                    id: frame.id,
                    error: { code: "unknown_method", message: "unknown method: " + frame.method }
                });
            }
        },
        _closed: function() {
            connected = false;
            for (var id in pending) {
                fail(id, { code: "channel_closed", message: "channel closed" });
            }
            pending = {};
        }
    };

    Object.defineProperty(window, "appInfo", {
        value: Object.freeze({{app_info}}),
        writable: false
    });

    var apis = {
        workspace: Object.freeze({
            list: function() { return call({{workspace_list}}, []); },
            delete: function(id) { return call({{workspace_delete}}, [id]); }
        }),
        openLoadDBFileDialog: function() { return call({{open_load}}, []); },
        openSaveDBFileDialog: function() { return call({{open_save}}, []); },
        onThemeChange: function(theme) { return call({{on_theme}}, [theme]); },
        onSidebarVisibilityChange: function(visible) { return call({{on_sidebar}}, [visible]); },
        onWorkspaceChange: function(id) { return call({{on_workspace}}, [id]); },
        openDBFolder: function() { return call({{open_folder}}, []); },
        getGoogleOauthCode: function() { return call({{oauth}}, []); },
        updateEnv: function(name, value) { notify({{update_env}}, [name, value]); }
    };
    Object.defineProperty(window, "apis", { value: Object.freeze(apis), writable: false });
    {{spellcheck}}
})();
"#;

fn js_string(s: &str) -> String {
    escape_separators(&Value::String(s.to_owned()).to_string())
}

/// JSON text can contain U+2028/U+2029, which older JS engines reject in
/// source text.
fn escape_separators(json: &str) -> String {
    json.replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Initialization script injected into the main window before any page
/// script runs.
pub fn bridge_init_script(app_info: &AppInfo, spellcheck: bool) -> String {
    let app_info = serde_json::to_string(app_info).unwrap_or_else(|_| "{}".to_owned());
    let spellcheck = if spellcheck {
        ""
    } else {
        r#"document.addEventListener("DOMContentLoaded", function() {
        document.documentElement.setAttribute("spellcheck", "false");
    });"#
    };

    let mut script = BRIDGE_SCRIPT
        .replace("{{handshake}}", &js_string(HANDSHAKE_CHANNEL))
        .replace("{{app_info}}", &escape_separators(&app_info))
        .replace("{{spellcheck}}", spellcheck);

    for (placeholder, capability) in [
        ("{{workspace_list}}", Capability::WorkspaceList),
        ("{{workspace_delete}}", Capability::WorkspaceDelete),
        ("{{open_load}}", Capability::OpenLoadDbFileDialog),
        ("{{open_save}}", Capability::OpenSaveDbFileDialog),
        ("{{on_theme}}", Capability::OnThemeChange),
        ("{{on_sidebar}}", Capability::OnSidebarVisibilityChange),
        ("{{on_workspace}}", Capability::OnWorkspaceChange),
        ("{{open_folder}}", Capability::OpenDbFolder),
        ("{{oauth}}", Capability::GetGoogleOauthCode),
        ("{{update_env}}", Capability::UpdateEnv),
    ] {
        script = script.replace(placeholder, &js_string(capability.method_name()));
    }
    script
}

/// Script delivering one transport message to content.
pub fn js_deliver_message(message: &Value) -> String {
    format!(
        "window.__atrium && window.__atrium._deliver({});",
        escape_separators(&message.to_string())
    )
}

/// Script announcing the channel to content under `channel`.
pub fn js_transfer_port(channel: &str) -> String {
    format!(
        "window.__atrium && window.__atrium._port({});",
        js_string(channel)
    )
}

/// Script telling content the channel is gone.
pub const JS_CHANNEL_CLOSED: &str = "window.__atrium && window.__atrium._closed();";

/// Parse the body of an IPC post from content. Non-JSON bodies are
/// rejected.
pub fn parse_ipc_body(body: &str) -> Option<Value> {
    serde_json::from_str(body).ok()
}
