use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::artifacts::{read_marker, ArtifactError, CHECKSUM_FILE, VERSION_FILE};
use crate::models::{iso_timestamp, Endpoints, ServerConfig, VersionResponse, UNKNOWN};
use crate::origin::RequestOrigin;
use crate::pages::not_found;
use crate::AppState;

pub fn routes() -> axum::Router<AppState> {
    axum::Router::new().route(
        "/version",
        axum::routing::get(get_version_info).fallback(not_found),
    )
}

/// GET /api/version
/// Current published version and checksum, with absolute download URLs
async fn get_version_info(
    State(state): State<AppState>,
    origin: RequestOrigin,
) -> impl IntoResponse {
    match build_version_info(&state.config, &origin).await {
        Ok(info) => Ok(Json(info)),
        Err(e) => {
            tracing::error!("Failed to read version info: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Failed to read version info",
                    "message": e.to_string()
                })),
            ))
        }
    }
}

async fn build_version_info(
    config: &ServerConfig,
    origin: &RequestOrigin,
) -> Result<VersionResponse, ArtifactError> {
    let version = read_marker(config, VERSION_FILE).await?;
    let md5 = read_marker(config, CHECKSUM_FILE).await?;

    Ok(VersionResponse {
        version: version.unwrap_or_else(|| UNKNOWN.to_string()),
        md5: md5.unwrap_or_else(|| UNKNOWN.to_string()),
        timestamp: iso_timestamp(),
        server: config.server_label.clone(),
        endpoints: Endpoints::for_origin(&origin.base_url()),
    })
}
