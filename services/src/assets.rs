//! Static asset serving for the browser client.
//!
//! Any request that no API route claims ends up here. The request path is
//! percent-decoded and resolved lexically against the configured public
//! directory; a path that climbs above it is refused before the filesystem is
//! touched.

use crate::config::Config;
use axum::{
    Extension,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const INDEX_DOCUMENT: &str = "index.html";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Forbidden")]
    Forbidden,

    #[error("Not Found")]
    NotFound,

    #[error("Server error")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AssetError {
    fn into_response(self) -> Response {
        let status = match &self {
            AssetError::Forbidden => StatusCode::FORBIDDEN,
            AssetError::NotFound => StatusCode::NOT_FOUND,
            AssetError::Io(e) => {
                tracing::error!(error = %e, "Failed to read static asset");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Fallback handler serving files from the public directory.
pub async fn serve_asset(Extension(config): Extension<Config>, uri: Uri) -> Response {
    match load_asset(config.public_dir(), uri.path()).await {
        Ok((content_type, bytes)) => {
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
        Err(e) => {
            tracing::debug!(path = %uri.path(), error = %e, "Static asset not served");
            e.into_response()
        }
    }
}

async fn load_asset(root: &Path, request_path: &str) -> Result<(&'static str, Vec<u8>), AssetError> {
    let mut path = resolve_asset_path(root, request_path)?;

    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|_| AssetError::NotFound)?;
    if metadata.is_dir() {
        path.push(INDEX_DOCUMENT);
    }

    let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound | ErrorKind::IsADirectory => AssetError::NotFound,
        _ => AssetError::Io(e),
    })?;

    Ok((content_type_for(&path), bytes))
}

/// Maps a request path onto a file below `root`.
///
/// `/` maps to the index document. `.` segments and empty segments are
/// skipped, `..` pops one level and fails with [`AssetError::Forbidden`] when
/// nothing is left to pop.
pub fn resolve_asset_path(root: &Path, request_path: &str) -> Result<PathBuf, AssetError> {
    let decoded = urlencoding::decode(request_path).map_err(|_| AssetError::NotFound)?;
    let relative: &str = if decoded == "/" {
        INDEX_DOCUMENT
    } else {
        &decoded
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(AssetError::Forbidden);
                }
            }
            // separators and NUL smuggled in through percent-encoding
            s if s.contains(['\\', '\0']) => return Err(AssetError::Forbidden),
            s => segments.push(s),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    Ok(path)
}

/// Content type derived from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_maps_to_index() {
        let path = resolve_asset_path(Path::new("/srv/public"), "/").unwrap();
        assert_eq!(path, Path::new("/srv/public/index.html"));
    }

    #[test]
    fn test_nested_path_resolves_below_root() {
        let path = resolve_asset_path(Path::new("/srv/public"), "/css/./site.css").unwrap();
        assert_eq!(path, Path::new("/srv/public/css/site.css"));

        let path = resolve_asset_path(Path::new("/srv/public"), "/a/../app.js").unwrap();
        assert_eq!(path, Path::new("/srv/public/app.js"));
    }

    #[test]
    fn test_percent_encoded_names_are_decoded() {
        let path = resolve_asset_path(Path::new("/srv/public"), "/my%20file.txt").unwrap();
        assert_eq!(path, Path::new("/srv/public/my file.txt"));
    }

    #[test]
    fn test_escaping_paths_are_forbidden() {
        for request in [
            "/../secret.txt",
            "/a/../../secret.txt",
            "/%2e%2e/secret.txt",
            "/..%2fsecret.txt",
            "/..%5csecret.txt",
        ] {
            assert!(
                matches!(
                    resolve_asset_path(Path::new("/srv/public"), request),
                    Err(AssetError::Forbidden)
                ),
                "{request} should be forbidden"
            );
        }
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            content_type_for(Path::new("index.HTML")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("pkg/app_bg.wasm")), "application/wasm");
        assert_eq!(content_type_for(Path::new("data.bin")), FALLBACK_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("Makefile")), FALLBACK_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_directory_serves_index_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/index.html"), "<p>docs</p>").unwrap();

        let (content_type, bytes) = load_asset(dir.path(), "/docs").await.unwrap();
        assert_eq!(content_type, "text/html; charset=utf-8");
        assert_eq!(bytes, b"<p>docs</p>");
    }

    #[tokio::test]
    async fn test_directory_without_index_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();

        let err = load_asset(dir.path(), "/empty/").await.unwrap_err();
        assert!(matches!(err, AssetError::NotFound));
    }
}
