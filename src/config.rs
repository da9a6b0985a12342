use std::env;

use crate::error::AppError;
use crate::providers::osrm::OsrmConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub osrm_base_url: String,
    pub osrm_profile: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            osrm_base_url: env::var("OSRM_BASE_URL")
                .unwrap_or_else(|_| "https://router.project-osrm.org".to_string()),
            osrm_profile: env::var("OSRM_PROFILE").unwrap_or_else(|_| "driving".to_string()),
            request_timeout_secs: parse_or_default("REQUEST_TIMEOUT_SECS", 10)?,
        })
    }
}

impl From<&Config> for OsrmConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.osrm_base_url.clone(),
            profile: config.osrm_profile.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Provider(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_or_default;

    #[test]
    fn missing_key_falls_back_to_default() {
        let value: u64 = parse_or_default("CREW_TRANSIT_UNSET_KEY", 10).unwrap();
        assert_eq!(value, 10);
    }
}
