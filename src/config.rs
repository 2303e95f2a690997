use std::env;
use std::time::Duration;

use tracing_subscriber::filter::LevelFilter;

use crate::error::{AdminError, AdminResult};

pub const DEFAULT_PROGRESS_CAPACITY: u32 = 250;
pub const DEFAULT_REFRESH_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Score that fills a user's progress bar.
    pub progress_capacity: u32,
    pub refresh_secs: u64,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            progress_capacity: DEFAULT_PROGRESS_CAPACITY,
            refresh_secs: DEFAULT_REFRESH_SECS,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AdminResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> AdminResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let progress_capacity = match lookup("WOTD_PROGRESS_CAPACITY") {
            Some(raw) => parse_positive::<u32>("WOTD_PROGRESS_CAPACITY", &raw)?,
            None => defaults.progress_capacity,
        };

        let refresh_secs = match lookup("WOTD_REFRESH_SECS") {
            Some(raw) => parse_positive::<u64>("WOTD_REFRESH_SECS", &raw)?,
            None => defaults.refresh_secs,
        };

        let log_level = match lookup("WOTD_LOG") {
            Some(raw) => {
                let level = raw.trim();
                level.parse::<LevelFilter>().map_err(|_| {
                    AdminError::Config(format!("WOTD_LOG must be a log level, got {raw:?}"))
                })?;
                level.to_lowercase()
            }
            None => defaults.log_level,
        };

        Ok(Self {
            progress_capacity,
            refresh_secs,
            log_level,
        })
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

fn parse_positive<T>(key: &str, raw: &str) -> AdminResult<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => Ok(value),
        _ => Err(AdminError::Config(format!(
            "{key} must be a positive integer, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.refresh_period(), Duration::from_secs(60));
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("WOTD_PROGRESS_CAPACITY", "500"),
            ("WOTD_REFRESH_SECS", "1"),
            ("WOTD_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(config.progress_capacity, 500);
        assert_eq!(config.refresh_secs, 1);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn rejects_zero_and_garbage() {
        let err = AppConfig::from_lookup(lookup(&[("WOTD_PROGRESS_CAPACITY", "0")])).unwrap_err();
        assert!(matches!(err, AdminError::Config(_)));
        let err = AppConfig::from_lookup(lookup(&[("WOTD_REFRESH_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, AdminError::Config(_)));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = AppConfig::from_lookup(lookup(&[("WOTD_LOG", "loud")])).unwrap_err();
        assert!(matches!(err, AdminError::Config(_)));
        let config = AppConfig::from_lookup(lookup(&[("WOTD_LOG", "WARN")])).unwrap();
        assert_eq!(config.log_level, "warn");
    }
}
