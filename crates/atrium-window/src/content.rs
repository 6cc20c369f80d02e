//! Packaged content served through the `atrium://` custom protocol.
//!
//! In production the window loads [`PACKAGED_INDEX_URL`]; every request on
//! the scheme is resolved against the bundled content directory without a
//! local HTTP server.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use tracing::warn;

/// Custom protocol scheme for packaged content.
pub const CONTENT_SCHEME: &str = "atrium";

/// Entry point of the packaged content.
pub const PACKAGED_INDEX_URL: &str = "atrium://localhost/index.html";

/// Origin under which Windows/Linux webviews expose custom protocols.
pub const CONTENT_HTTP_ORIGIN: &str = "http://atrium.localhost";

/// Served when a request names a directory or nothing at all.
const INDEX_FILE: &str = "index.html";

/// Serves files below a base directory.
pub struct ContentProvider {
    base_dir: PathBuf,
    /// Path -> (mime, bytes). Checked before the filesystem.
    overrides: HashMap<String, (String, Vec<u8>)>,
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Register an in-memory asset.
    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        self.overrides
            .insert(path.into(), (mime.into(), data.into()));
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a path relative to the content root to (mime, bytes).
    ///
    /// Paths escaping the root, including through symlinks, resolve to
    /// nothing.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = normalize(path)?;

        if let Some((mime, data)) = self.overrides.get(&clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        let file_path = self.base_dir.join(&clean);
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            warn!(path = %clean, "content request escapes the content root");
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        let mime = mime_from_extension(&file_path);
        Some((Cow::Borrowed(mime), Cow::Owned(data)))
    }

    /// Resolve a full request URI on the content scheme.
    pub fn resolve_uri(&self, uri: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        self.resolve(request_path(uri))
    }
}

/// Path part of a content request, without scheme, host, query or
/// fragment.
pub fn request_path(uri: &str) -> &str {
    let rest = [
        "atrium://localhost/",
        "atrium://localhost",
        "atrium:///",
        "atrium://",
        "http://atrium.localhost/",
        "http://atrium.localhost",
        "https://atrium.localhost/",
        "https://atrium.localhost",
    ]
    .iter()
    .find_map(|prefix| uri.strip_prefix(prefix))
    .unwrap_or(uri);

    let end = rest.find(['?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

/// Relative, slash-separated form of `path`, with the index file
/// substituted for directory requests. `None` for paths with parent or
/// root components.
fn normalize(path: &str) -> Option<String> {
    let trimmed = path.trim_start_matches('/');
    let decoded = urlencoding::decode(trimmed).ok()?;

    let mut parts = Vec::new();
    for component in Path::new(decoded.as_ref()).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_owned()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if parts.is_empty() || decoded.ends_with('/') {
        parts.push(INDEX_FILE.to_owned());
    }
    Some(parts.join("/"))
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") | Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
