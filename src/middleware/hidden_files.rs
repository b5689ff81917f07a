use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::pages::not_found;

/// Hide dotfiles (`.env`, `.git/config`, ...) in the public directory behind the 404 page
pub async fn hidden_files_middleware(request: Request, next: Next) -> Response {
    if is_hidden_path(request.uri().path()) {
        let uri = request.uri().clone();
        return not_found(uri).await.into_response();
    }

    next.run(request).await
}

fn is_hidden_path(path: &str) -> bool {
    path.split('/').any(|segment| {
        // "%2e" decodes to "." once ServeDir sees it
        segment.starts_with('.')
            || segment
                .get(..3)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("%2e"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServerConfig;
    use axum::{body::Body, http::StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_is_hidden_path() {
        assert!(is_hidden_path("/.env"));
        assert!(is_hidden_path("/.git/config"));
        assert!(is_hidden_path("/builds/.cache/firmware.bin"));
        assert!(is_hidden_path("/%2Eenv"));
        assert!(!is_hidden_path("/firmware.bin"));
        assert!(!is_hidden_path("/releases/v1.2.3/notes.txt"));
        assert!(!is_hidden_path("/"));
    }

    #[tokio::test]
    async fn test_dotfiles_in_public_dir_are_404() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(".env"), "SECRET=1").unwrap();
        std::fs::create_dir(temp_dir.path().join(".git")).unwrap();
        std::fs::write(temp_dir.path().join(".git/config"), "[core]").unwrap();

        for uri in ["/.env", "/.git/config", "/%2eenv"] {
            let response = crate::app(ServerConfig::with_public_dir(temp_dir.path()))
                .oneshot(
                    axum::http::Request::builder()
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = String::from_utf8(body.to_vec()).unwrap();
            assert!(!body.contains("SECRET"));
            assert!(body.contains(uri));
        }
    }
}
