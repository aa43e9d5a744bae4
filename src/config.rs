use crate::error::AppError;

/// Ten years; keeps the session lifetime in seconds well inside an i64
pub const MAX_SESSION_EXPIRY_HOURS: i64 = 24 * 365 * 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub session_expiry_hours: i64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub request_timeout_secs: u64,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Config {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: parse_var("SERVER_PORT", "8080")?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://waste_exchange.db?mode=rwc".to_string()),
            session_expiry_hours: parse_var("SESSION_EXPIRY_HOURS", "24")?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "20")?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", "1")?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
            secure_cookies: parse_var("SECURE_COOKIES", "false")?,
        }
        .validate()
    }

    pub fn validate(self) -> Result<Self, AppError> {
        if !(1..=MAX_SESSION_EXPIRY_HOURS).contains(&self.session_expiry_hours) {
            return Err(AppError::Config(format!(
                "SESSION_EXPIRY_HOURS must be between 1 and {}",
                MAX_SESSION_EXPIRY_HOURS
            )));
        }
        if self.db_min_connections > self.db_max_connections {
            return Err(AppError::Config(
                "DB_MIN_CONNECTIONS cannot exceed DB_MAX_CONNECTIONS".to_string(),
            ));
        }
        Ok(self)
    }

    /// Session cookie lifetime, matching the stored session expiry
    pub fn session_max_age_secs(&self) -> i64 {
        self.session_expiry_hours.saturating_mul(3600)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            database_url: "sqlite::memory:".to_string(),
            session_expiry_hours: 24,
            db_max_connections: 1,
            db_min_connections: 1,
            request_timeout_secs: 30,
            secure_cookies: false,
        }
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default().validate().unwrap();
        assert_eq!(config.session_max_age_secs(), 24 * 3600);
    }

    #[test]
    fn test_session_expiry_is_bounded() {
        for hours in [0, -1, MAX_SESSION_EXPIRY_HOURS + 1, i64::MAX] {
            let config = Config {
                session_expiry_hours: hours,
                ..Config::default()
            };
            assert!(matches!(config.validate(), Err(AppError::Config(_))), "{}", hours);
        }

        let config = Config {
            session_expiry_hours: MAX_SESSION_EXPIRY_HOURS,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
