use serde::Serialize;

/// Placeholder reported when an artifact has not been published
pub const UNKNOWN: &str = "unknown";

/// Response for GET /api/version
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub md5: String,
    pub timestamp: String,
    pub server: String,
    pub endpoints: Endpoints,
}

/// Absolute artifact URLs for the requesting device
#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub version: String,
    pub firmware: String,
    pub md5: String,
}

impl Endpoints {
    pub fn for_origin(base_url: &str) -> Self {
        Self {
            version: format!("{}/version.txt", base_url),
            firmware: format!("{}/firmware.bin", base_url),
            md5: format!("{}/firmware.md5", base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_for_origin() {
        let endpoints = Endpoints::for_origin("https://ota.example.com");
        assert_eq!(endpoints.version, "https://ota.example.com/version.txt");
        assert_eq!(endpoints.firmware, "https://ota.example.com/firmware.bin");
        assert_eq!(endpoints.md5, "https://ota.example.com/firmware.md5");
    }
}
