use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_SERVER_LABEL: &str = "ESP8266 OTA Server";

/// Server configuration, built once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub public_dir: PathBuf,
    pub server_label: String,
    pub started_at: Instant,
}

impl ServerConfig {
    /// Load configuration from `PORT`, `PUBLIC_DIR` and `SERVER_LABEL`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
        }

        if let Some(dir) = lookup("PUBLIC_DIR").filter(|v| !v.trim().is_empty()) {
            config.public_dir = PathBuf::from(dir);
        }

        if let Some(label) = lookup("SERVER_LABEL").filter(|v| !v.trim().is_empty()) {
            config.server_label = label;
        }

        Ok(config)
    }

    pub fn with_public_dir(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.public_dir.join(name)
    }

    /// Seconds since the server was constructed
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            server_label: DEFAULT_SERVER_LABEL.to_string(),
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
}
