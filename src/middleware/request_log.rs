use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::{Extensions, HeaderMap},
    middleware::Next,
    response::Response,
};

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Logs method, path and client address for every request
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let client = client_addr(request.headers(), request.extensions());

    tracing::info!(%method, %path, %client, "request");

    next.run(request).await
}

/// Best guess at the device address: first X-Forwarded-For hop, then the peer socket
pub fn client_addr(headers: &HeaderMap, extensions: &Extensions) -> String {
    let forwarded = headers
        .get(X_FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(addr) = forwarded {
        return addr.to_string();
    }

    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
