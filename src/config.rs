use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings read from the environment (and `.env` via `dotenv`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Built UI bundle to serve at `/`, if any.
    pub static_dir: Option<PathBuf>,
    pub confirmation_ttl: Duration,
    pub template_cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://repair_desk.db?mode=rwc".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            static_dir: None,
            confirmation_ttl: Duration::from_secs(120),  // 2 minutes
            template_cache_ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            static_dir: std::env::var("STATIC_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            confirmation_ttl: parse_duration_secs("CONFIRMATION_TTL_SECS", 120),
            template_cache_ttl: parse_duration_secs("TEMPLATE_CACHE_TTL_SECS", 300),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
