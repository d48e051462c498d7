use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory where uploaded assets are written.
    pub dir: String,
    /// Public URL prefix the uploads directory is served under.
    pub public_prefix: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT").ok().and_then(|s| s.parse().ok()).unwrap_or(5000),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_default(),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            },
            security: SecurityConfig {
                jwt_secret: env::var("JWT_SECRET").unwrap_or_default(),
                jwt_expiry_hours: env::var("JWT_EXPIRY_HOURS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(24 * 5), // matches the 5 day admin token lifetime
                admin_username: env::var("ADMIN_USERNAME").unwrap_or_default(),
                admin_password: env::var("ADMIN_PASSWORD").unwrap_or_default(),
            },
            uploads: UploadConfig {
                dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
                public_prefix: env::var("UPLOAD_PUBLIC_PREFIX")
                    .unwrap_or_else(|_| "/uploads".to_string()),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
