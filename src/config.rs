use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Development,
            _ => Self::Production,
        }
    }

    #[must_use]
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Deployment
    pub environment: Environment,
    pub port: u16,

    // Database
    pub database_url: Option<String>,
    pub db_pool_size: u32,
    pub db_max_overflow: u32,

    // Auth
    pub api_key: Option<String>,
    pub allow_query_key_fallback: bool,

    // Sibling ingestion service (not consumed by any route; kept so one
    // .env file serves both deployments)
    pub external_db_api_url: Option<String>,

    // Behavior toggles
    pub use_dummy_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every field has a default or is optional. A missing `DATABASE_URL` or
    /// `API_KEY` is not a startup error; the affected routes fail when hit.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            environment: Environment::from_str(
                &env_non_empty("FLASK_ENV")
                    .or_else(|| env_non_empty("NODE_ENV"))
                    .unwrap_or_else(|| "production".to_string()),
            ),
            port: env_non_empty("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            database_url: env_non_empty("DATABASE_URL"),
            db_pool_size: env_non_empty("DB_POOL_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            db_max_overflow: env_non_empty("DB_MAX_OVERFLOW")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            api_key: env_non_empty("API_KEY").or_else(|| env_non_empty("EXTERNAL_DB_API_KEY")),
            allow_query_key_fallback: parse_bool_flag(
                &env::var("ALLOW_QUERY_KEY_FALLBACK").unwrap_or_default(),
            ),
            external_db_api_url: env_non_empty("EXTERNAL_DB_API_URL"),
            use_dummy_data: parse_bool_flag(&env::var("USE_DUMMY_DATA").unwrap_or_default()),
        }
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Pool ceiling, mirroring SQLAlchemy's pool_size + max_overflow split.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_pool_size + self.db_max_overflow
    }
}

/// Set-but-empty variables count as unset, so `API_KEY=` in a .env file
/// still falls through to `EXTERNAL_DB_API_KEY`.
fn env_non_empty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Truthy flags accept 1/true/yes/on in any case, with surrounding whitespace.
fn parse_bool_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_flags_accept_documented_truthy_forms() {
        for truthy in ["1", "true", "yes", "on", "TRUE", "Yes", " on ", "ON"] {
            assert!(parse_bool_flag(truthy), "{truthy:?} should be truthy");
        }
    }

    #[test]
    fn bool_flags_reject_everything_else() {
        for falsy in ["", "0", "false", "no", "off", "2", "enabled", "y"] {
            assert!(!parse_bool_flag(falsy), "{falsy:?} should be falsy");
        }
    }

    #[test]
    fn environment_defaults_to_production() {
        assert_eq!(Environment::from_str("dev"), Environment::Development);
        assert_eq!(Environment::from_str("Development"), Environment::Development);
        assert_eq!(Environment::from_str("production"), Environment::Production);
        assert_eq!(Environment::from_str("staging"), Environment::Production);
        assert_eq!(Environment::from_str(""), Environment::Production);
    }

    #[test]
    fn pool_ceiling_adds_overflow() {
        let config = Config {
            environment: Environment::Production,
            port: 5000,
            database_url: None,
            db_pool_size: 5,
            db_max_overflow: 10,
            api_key: None,
            allow_query_key_fallback: false,
            external_db_api_url: None,
            use_dummy_data: false,
        };
        assert_eq!(config.db_max_connections(), 15);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }
}
