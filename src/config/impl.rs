use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, error, warn};

use super::AppConfig;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    fn load_from_file() -> Self {
        let config_paths = [
            "config.toml",
            "mylinks.toml",
            "config/config.toml",
            "/etc/mylinks/config.toml",
        ];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<AppConfig>(&content) {
                        Ok(config) => {
                            debug!("Successfully loaded config from: {}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    fn override_with_env(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            } else {
                error!("Invalid SERVER_PORT: {}", port);
            }
        }
        if let Ok(cors_origin) = env::var("CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.database.database_url = database_url;
        }
        if let Ok(pool_size) = env::var("DATABASE_POOL_SIZE") {
            if let Ok(size) = pool_size.parse::<u32>() {
                self.database.pool_size = size;
            } else {
                error!("Invalid DATABASE_POOL_SIZE: {}", pool_size);
            }
        }

        if let Ok(jwt_secret) = env::var("JWT_SECRET") {
            self.api.jwt_secret = jwt_secret;
        }

        if let Ok(interval) = env::var("ANALYTICS_FLUSH_INTERVAL") {
            if let Ok(secs) = interval.parse() {
                self.analytics.flush_interval_secs = secs;
            } else {
                error!("Invalid ANALYTICS_FLUSH_INTERVAL: {}", interval);
            }
        }
        if let Ok(retention) = env::var("ANALYTICS_RETENTION_DAYS") {
            if let Ok(days) = retention.parse() {
                self.analytics.retention_days = days;
            } else {
                error!("Invalid ANALYTICS_RETENTION_DAYS: {}", retention);
            }
        }

        if let Ok(log_level) = env::var("RUST_LOG") {
            self.logging.level = log_level;
        }
    }
}

/// Get the global configuration instance
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::load)
}

/// Initialize the global configuration
pub fn init_config() {
    CONFIG.get_or_init(AppConfig::load);
}
