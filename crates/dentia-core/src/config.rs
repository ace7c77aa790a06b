//! Configuration module
//!
//! Environment-driven configuration, loaded once at startup and validated
//! before any service is constructed. Fail fast on misconfiguration.

use std::env;

const DEFAULT_SERVER_PORT: u16 = 8000;
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_SCAN_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Host (or IP) used when building public report URLs.
    pub public_host: String,
    pub cors_origins: Vec<String>,
    pub environment: String,

    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,

    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,

    /// Directory holding staging images, intermediate documents, and the
    /// final PDF reports. Served read-only under `/reports`.
    pub reports_dir: String,
    /// Request body limit for scan uploads.
    pub max_scan_size_bytes: usize,

    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Path to the LibreOffice binary used for DOCX → PDF conversion.
    pub soffice_path: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_required(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).map_err(|_| anyhow::anyhow!("{} environment variable must be set", key))
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Best-effort .env loading; absence is fine in production
        let _ = dotenvy::dotenv();

        let cors_origins = env_or("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT),
            public_host: env_or("PUBLIC_SERVER_IP", "127.0.0.1"),
            cors_origins,
            environment: env_or("ENVIRONMENT", "development"),
            database_url: env_required("DATABASE_URL")?,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS),
            jwt_secret: env_required("JWT_SECRET")?,
            jwt_expiry_hours: env_parse("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS),
            reports_dir: env_or("REPORTS_DIR", "reports"),
            max_scan_size_bytes: env_parse("MAX_SCAN_SIZE_BYTES", DEFAULT_MAX_SCAN_SIZE_BYTES),
            gemini_api_key: env_required("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", "gemini-1.5-flash"),
            soffice_path: env_or("SOFFICE_PATH", "soffice"),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters");
        }
        if self.jwt_expiry_hours <= 0 {
            anyhow::bail!("JWT_EXPIRY_HOURS must be positive");
        }
        if self.reports_dir.trim().is_empty() {
            anyhow::bail!("REPORTS_DIR must not be empty");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Base URL under which generated reports are publicly reachable.
    pub fn public_base_url(&self) -> String {
        format!("http://{}:{}", self.public_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 8000,
            public_host: "198.51.100.7".to_string(),
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            database_url: "postgres://localhost/dentia".to_string(),
            db_max_connections: 20,
            db_timeout_seconds: 30,
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            jwt_expiry_hours: 24,
            reports_dir: "reports".to_string(),
            max_scan_size_bytes: 10 * 1024 * 1024,
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-1.5-flash".to_string(),
            soffice_path: "soffice".to_string(),
        }
    }

    #[test]
    fn test_public_base_url() {
        let config = test_config();
        assert_eq!(config.public_base_url(), "http://198.51.100.7:8000");
    }

    #[test]
    fn test_validate_rejects_short_jwt_secret() {
        let mut config = test_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }
}
