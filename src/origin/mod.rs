//! `scheme://host` of an inbound request, as the client addressed it.
//!
//! Deployments usually sit behind a TLS-terminating proxy, so forwarded
//! headers win over what the socket saw.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HOST, request::Parts, HeaderMap},
};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    pub scheme: String,
    pub host: String,
}

impl RequestOrigin {
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    fn from_parts(parts: &Parts) -> Self {
        let scheme = first_header_value(&parts.headers, X_FORWARDED_PROTO)
            .or_else(|| parts.uri.scheme_str().map(str::to_string))
            .unwrap_or_else(|| "http".to_string());

        let host = first_header_value(&parts.headers, X_FORWARDED_HOST)
            .or_else(|| first_header_value(&parts.headers, HOST.as_str()))
            .or_else(|| parts.uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());

        Self { scheme, host }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

// Proxies may append, e.g. "https, http"
fn first_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn origin_of(request: Request<()>) -> RequestOrigin {
        let (parts, _) = request.into_parts();
        RequestOrigin::from_parts(&parts)
    }

    #[test]
    fn test_plain_host_header() {
        let origin = origin_of(
            Request::builder()
                .uri("/api/version")
                .header(HOST, "192.168.1.10:3000")
                .body(())
                .unwrap(),
        );
        assert_eq!(origin.base_url(), "http://192.168.1.10:3000");
    }

    #[test]
    fn test_absolute_uri() {
        let origin = origin_of(
            Request::builder()
                .uri("https://ota.example.com/api/version")
                .body(())
                .unwrap(),
        );
        assert_eq!(origin.base_url(), "https://ota.example.com");
    }

    #[test]
    fn test_forwarded_headers_take_precedence() {
        let origin = origin_of(
            Request::builder()
                .uri("/api/version")
                .header(HOST, "10.0.0.5:3000")
                .header(X_FORWARDED_PROTO, "https, http")
                .header(X_FORWARDED_HOST, "ota.example.com")
                .body(())
                .unwrap(),
        );
        assert_eq!(origin.scheme, "https");
        assert_eq!(origin.host, "ota.example.com");
    }

    #[test]
    fn test_fallbacks_without_host() {
        let origin = origin_of(Request::builder().uri("/").body(()).unwrap());
        assert_eq!(origin.base_url(), "http://localhost");
    }
}
