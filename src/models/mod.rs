use chrono::{SecondsFormat, Utc};

pub mod config;
pub mod health;
pub mod version;

pub use config::ServerConfig;
pub use health::{HealthResponse, MemoryUsage};
pub use version::{Endpoints, VersionResponse, UNKNOWN};

/// Current UTC time, e.g. `2026-10-16T09:30:00.123Z`
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp_millis_utc() {
        let ts = iso_timestamp();
        assert!(ts.ends_with('Z'));
        // 2026-10-16T09:30:00.123Z
        assert_eq!(ts.len(), 24);
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
