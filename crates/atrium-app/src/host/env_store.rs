//! The host env file: `NAME=value` lines loaded into the process at
//! startup and updated by `updateEnv`.

use std::io;
use std::path::Path;

use atrium_bridge::HostError;
use tracing::warn;

/// Parse env file contents. Blank lines and `#` comments are skipped;
/// surrounding quotes on values are removed, and inside double quotes
/// `\"` and `\\` are unescaped.
pub fn parse(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let unquoted = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
                Some(inner) => unescape(inner),
                None => value
                    .strip_prefix('\'')
                    .and_then(|v| v.strip_suffix('\''))
                    .unwrap_or(value)
                    .to_owned(),
            };
            (key.trim().to_owned(), unquoted)
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Set every variable from the file at `path` that is not already set in
/// the process. Returns how many were applied; a missing file applies none.
pub fn load_into_process(path: &Path) -> usize {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return 0;
    };
    let mut applied = 0;
    for (key, value) in parse(&contents) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
            applied += 1;
        }
    }
    applied
}

/// Env variable names: ASCII letters, digits and underscores, not starting
/// with a digit.
pub fn validate_name(name: &str) -> Result<(), HostError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(HostError::Rejected(format!("invalid env name: {name:?}")));
    }
    Ok(())
}

/// Set `name` to `value` in the file at `path`, replacing an existing
/// assignment and keeping every other line.
pub fn upsert(path: &Path, name: &str, value: &str) -> Result<(), HostError> {
    validate_name(name)?;
    if value.contains(['\n', '\r']) {
        return Err(HostError::Rejected(format!(
            "value for {name} spans multiple lines"
        )));
    }

    let existing = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let assignment = format!("{name}={}", quote(value));
    let mut replaced = false;
    let mut lines: Vec<String> = existing
        .lines()
        .map(|line| {
            let is_target = line
                .split_once('=')
                .is_some_and(|(key, _)| key.trim() == name && !line.trim_start().starts_with('#'));
            if is_target && !replaced {
                replaced = true;
                assignment.clone()
            } else {
                line.to_owned()
            }
        })
        .collect();
    if !replaced {
        lines.push(assignment);
    }

    let mut contents = lines.join("\n");
    contents.push('\n');
    write_atomic(path, &contents)?;
    Ok(())
}

fn quote(value: &str) -> String {
    let needs_quotes = value != value.trim() || value.contains(['#', '"', '\'', '\\']);
    if !needs_quotes {
        return value.to_owned();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Undo [`quote`] escaping. Other backslashes are kept literally.
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '"' | '\\') {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, contents)?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        warn!("atomic rename failed ({e}), falling back to direct write");
        std::fs::write(path, contents)?;
        let _ = std::fs::remove_file(&tmp_path);
    }
    Ok(())
}
