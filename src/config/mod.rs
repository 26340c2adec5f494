use std::env;
use std::fmt;

use chrono::Duration;

use crate::suggestions::service::MAX_SUGGESTIONS;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub matching: MatchingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let cache_ttl_secs = env::var("MATCH_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidCacheTtl)?;

        let max_suggestions = env::var("MATCH_MAX_SUGGESTIONS")
            .unwrap_or_else(|_| MAX_SUGGESTIONS.to_string())
            .parse::<usize>()
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or(ConfigError::InvalidSuggestionLimit)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            matching: MatchingConfig {
                cache_ttl_secs,
                max_suggestions: max_suggestions.min(MAX_SUGGESTIONS),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings controlling credibility caching and suggestion output.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    pub cache_ttl_secs: i64,
    pub max_suggestions: usize,
}

impl MatchingConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::seconds(self.cache_ttl_secs)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidCacheTtl,
    InvalidSuggestionLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidCacheTtl => {
                write!(f, "MATCH_CACHE_TTL_SECS must be a positive integer")
            }
            ConfigError::InvalidSuggestionLimit => {
                write!(f, "MATCH_MAX_SUGGESTIONS must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("MATCH_CACHE_TTL_SECS");
        env::remove_var("MATCH_MAX_SUGGESTIONS");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.matching.cache_ttl(), Duration::seconds(3600));
        assert_eq!(config.matching.max_suggestions, 20);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn suggestion_limit_is_capped_at_twenty() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_MAX_SUGGESTIONS", "50");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.matching.max_suggestions, 20);
        reset_env();
    }

    #[test]
    fn rejects_non_positive_cache_ttl() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MATCH_CACHE_TTL_SECS", "0");
        let error = AppConfig::load().expect_err("zero ttl rejected");
        assert!(matches!(error, ConfigError::InvalidCacheTtl));
        reset_env();
    }

    #[test]
    fn recognizes_production_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        reset_env();
    }
}
