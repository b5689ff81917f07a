use serde::Serialize;

/// Response for GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub memory: MemoryUsage,
}

/// Resident and virtual memory of this process, in bytes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemoryUsage {
    pub rss: Option<u64>,
    pub peak_rss: Option<u64>,
    #[serde(rename = "virtual")]
    pub virtual_size: Option<u64>,
}

impl MemoryUsage {
    /// Take a snapshot from /proc/self/status; all fields are None off Linux
    pub fn snapshot() -> Self {
        match std::fs::read_to_string("/proc/self/status") {
            Ok(status) => Self::parse_proc_status(&status),
            Err(e) => {
                tracing::debug!("Memory usage unavailable: {}", e);
                Self::default()
            }
        }
    }

    fn parse_proc_status(status: &str) -> Self {
        let mut usage = Self::default();

        for line in status.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let slot = match key {
                "VmRSS" => &mut usage.rss,
                "VmHWM" => &mut usage.peak_rss,
                "VmSize" => &mut usage.virtual_size,
                _ => continue,
            };
            *slot = parse_kib(value);
        }

        usage
    }
}

// "  123456 kB" -> bytes
fn parse_kib(value: &str) -> Option<u64> {
    let mut parts = value.split_whitespace();
    let amount: u64 = parts.next()?.parse().ok()?;
    match parts.next() {
        Some("kB") | None => amount.checked_mul(1024),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_proc_status() {
        let status = "Name:\tota-server\n\
                      VmPeak:\t  20000 kB\n\
                      VmSize:\t  18000 kB\n\
                      VmHWM:\t    6000 kB\n\
                      VmRSS:\t    5000 kB\n\
                      Threads:\t4\n";

        let usage = MemoryUsage::parse_proc_status(status);
        assert_eq!(usage.rss, Some(5000 * 1024));
        assert_eq!(usage.peak_rss, Some(6000 * 1024));
        assert_eq!(usage.virtual_size, Some(18000 * 1024));
    }

    #[test]
    fn test_parse_proc_status_missing_fields() {
        let usage = MemoryUsage::parse_proc_status("Name:\tota-server\nVmRSS:\tgarbage kB\n");
        assert_eq!(usage, MemoryUsage::default());
    }

    #[test]
    fn test_memory_serializes_virtual_key() {
        let usage = MemoryUsage {
            rss: Some(1),
            peak_rss: None,
            virtual_size: Some(2),
        };
        let json = serde_json::to_value(&usage).unwrap();
        assert_eq!(json["virtual"], 2);
        assert!(json["peak_rss"].is_null());
    }
}
