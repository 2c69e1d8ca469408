use std::path::{Component, Path, PathBuf};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::AppState;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type for a served file, by extension. Unknown extensions fall
/// back to a generic binary type.
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Resolve a request path against the static root.
///
/// `/` maps to `index.html`. Returns `None` for paths carrying parent or
/// root components, so a request can never escape the static root.
fn resolve_path(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let relative = uri_path.trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };

    let candidate = Path::new(relative);
    if candidate
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    Some(root.join(candidate))
}

/// Fallback handler: any path not claimed by the API is served from the
/// static root; misses yield a plain-text 404.
pub async fn serve_static(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(file_path) = resolve_path(&state.static_root, uri.path()) else {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    };

    match tokio::fs::read(&file_path).await {
        Ok(bytes) => {
            let content_type = content_type_for(&file_path);
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(e) => {
            debug!("Static file {} not served: {e}", file_path.display());
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_mime_types() {
        assert_eq!(content_type_for(Path::new("index.html")), "text/html");
        assert_eq!(content_type_for(Path::new("styles.css")), "text/css");
        assert_eq!(
            content_type_for(Path::new("script.js")),
            "application/javascript"
        );
        assert_eq!(
            content_type_for(Path::new("data.json")),
            "application/json"
        );
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        assert_eq!(content_type_for(Path::new("favicon.ico")), FALLBACK_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("no_extension")), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn root_path_resolves_to_index() {
        let resolved = resolve_path(Path::new("/srv/static"), "/").unwrap();
        assert_eq!(resolved, Path::new("/srv/static/index.html"));
    }

    #[test]
    fn nested_path_resolves_under_root() {
        let resolved = resolve_path(Path::new("/srv/static"), "/assets/logo.svg").unwrap();
        assert_eq!(resolved, Path::new("/srv/static/assets/logo.svg"));
    }

    #[test]
    fn parent_components_are_rejected() {
        assert!(resolve_path(Path::new("/srv/static"), "/../etc/passwd").is_none());
        assert!(resolve_path(Path::new("/srv/static"), "/a/../../etc/passwd").is_none());
    }
}
