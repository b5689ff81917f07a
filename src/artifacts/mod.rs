use std::io;
use std::path::Path;

use axum::{
    extract::{Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::middleware::client_addr;
use crate::models::ServerConfig;
use crate::pages::not_found;
use crate::AppState;

pub const VERSION_FILE: &str = "version.txt";
pub const FIRMWARE_FILE: &str = "firmware.bin";
pub const CHECKSUM_FILE: &str = "firmware.md5";

pub fn routes() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/version.txt", get(get_version).fallback(not_found))
        .route("/firmware.bin", get(get_firmware).fallback(not_found))
        .route("/firmware.md5", get(get_checksum).fallback(not_found))
}

/// GET /version.txt
async fn get_version(State(state): State<AppState>) -> Response {
    serve_artifact(&state.config, VERSION_FILE).await
}

/// GET /firmware.bin
async fn get_firmware(State(state): State<AppState>, request: Request) -> Response {
    let result = read_artifact(&state.config, FIRMWARE_FILE).await;
    if result.is_ok() {
        let client = client_addr(request.headers(), request.extensions());
        tracing::info!(%client, "Serving {}", FIRMWARE_FILE);
    }
    artifact_response(FIRMWARE_FILE, result)
}

/// GET /firmware.md5
async fn get_checksum(State(state): State<AppState>) -> Response {
    serve_artifact(&state.config, CHECKSUM_FILE).await
}

async fn serve_artifact(config: &ServerConfig, name: &str) -> Response {
    artifact_response(name, read_artifact(config, name).await)
}

fn artifact_response(name: &str, result: Result<Vec<u8>, ArtifactError>) -> Response {
    match result {
        Ok(bytes) => (
            StatusCode::OK,
            [(CONTENT_TYPE, content_type_for(Path::new(name)))],
            bytes,
        )
            .into_response(),
        Err(ArtifactError::NotFound(name)) => {
            (StatusCode::NOT_FOUND, format!("{} not found", name)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to serve artifact: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Read an artifact in full, classifying a missing file separately from other I/O faults
pub async fn read_artifact(config: &ServerConfig, name: &str) -> Result<Vec<u8>, ArtifactError> {
    let path = config.artifact_path(name);
    tokio::fs::read(&path).await.map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArtifactError::NotFound(name.to_string()),
        _ => ArtifactError::Io {
            name: name.to_string(),
            source,
        },
    })
}

/// Read a text marker (version or checksum), trimmed. `Ok(None)` when unpublished.
pub async fn read_marker(
    config: &ServerConfig,
    name: &str,
) -> Result<Option<String>, ArtifactError> {
    match read_artifact(config, name).await {
        Ok(bytes) => Ok(Some(trim_marker(&String::from_utf8_lossy(&bytes)).to_string())),
        Err(ArtifactError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

// Editors on Windows like to prepend a byte order mark
fn trim_marker(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("txt" | "md5") => "text/plain; charset=utf-8",
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Failed to read {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}
