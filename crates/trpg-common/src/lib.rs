//! # trpg-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password_length, verify_password, AccessToken, Claims, JwtService,
    MIN_PASSWORD_LEN,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    LogConfig, RateLimitConfig, ServerConfig, SnowflakeConfig,
};
pub use error::{domain_status, AppError, AppResult, ErrorResponse};
pub use telemetry::{try_init_tracing_with_config, TracingConfig, TracingError};
