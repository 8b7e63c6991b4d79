use serde::{Deserialize, Serialize};

/// Static application configuration (TOML file + environment overrides)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub analytics: AnalyticsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Worker count; 0 means one per CPU
    pub cpu_count: usize,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cpu_count: 0,
            cors_origin: "*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub pool_size: u32,
    pub retry_count: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://mylinks.db?mode=rwc".to_string(),
            pool_size: 10,
            retry_count: 3,
            retry_base_delay_ms: 100,
            retry_max_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Secret for validating owner bearer tokens; a random secret is
    /// generated (and logged as a warning) when left empty
    pub jwt_secret: String,
    pub access_token_minutes: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Seconds between counter-buffer flushes to the database
    pub flush_interval_secs: u64,
    /// Event log retention in days; 0 keeps events forever
    pub retention_days: u64,
    pub retention_sweep_hours: u64,
    pub page_cache_ttl_secs: u64,
    pub page_cache_capacity: u64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            flush_interval_secs: 5,
            retention_days: 0,
            retention_sweep_hours: 24,
            page_cache_ttl_secs: 30,
            page_cache_capacity: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file path; empty or unset logs to stdout
    pub file: Option<String>,
    /// "plain" or "json"
    pub format: String,
    pub enable_rotation: bool,
    pub max_backups: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: "plain".to_string(),
            enable_rotation: true,
            max_backups: 7,
        }
    }
}
