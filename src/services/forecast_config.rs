use std::fs;
use std::num::NonZeroUsize;

use serde::Deserialize;
use thiserror::Error;

use crate::services::period_calendar::DEFAULT_PERIOD_DAYS;
use crate::services::simulation::DEFAULT_ITERATIONS;

#[derive(Error, Debug)]
pub enum ForecastConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(&'static str),
}

/// Settings file contents. Every key is optional.
///
/// ```yaml
/// iterations: 5000
/// period_days: 7
/// history_limit: 26
/// seed: 42
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    pub iterations: usize,
    pub period_days: u32,
    pub history_limit: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            period_days: DEFAULT_PERIOD_DAYS,
            history_limit: None,
            seed: None,
        }
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub iterations: Option<usize>,
    pub period_days: Option<u32>,
    pub history_limit: Option<usize>,
    pub seed: Option<u64>,
}

/// Resolved, validated settings for one forecast run.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSettings {
    pub iterations: usize,
    pub period_days: u32,
    pub history_limit: Option<NonZeroUsize>,
    pub seed: Option<u64>,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            period_days: DEFAULT_PERIOD_DAYS,
            history_limit: None,
            seed: None,
        }
    }
}

/// Checks a requested history window; zero periods is an error.
pub fn history_window(
    history_limit: Option<usize>,
) -> Result<Option<NonZeroUsize>, ForecastConfigError> {
    match history_limit {
        None => Ok(None),
        Some(periods) => NonZeroUsize::new(periods)
            .map(Some)
            .ok_or(ForecastConfigError::Invalid("history_limit must be greater than zero")),
    }
}

impl ForecastConfig {
    pub fn from_yaml_str(contents: &str, path: &str) -> Result<Self, ForecastConfigError> {
        serde_yaml::from_str(contents).map_err(|source| ForecastConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_yaml_file(path: &str) -> Result<Self, ForecastConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ForecastConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents, path)
    }

    pub fn load(path: Option<&str>) -> Result<Self, ForecastConfigError> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(
        self,
        overrides: &ConfigOverrides,
    ) -> Result<ForecastSettings, ForecastConfigError> {
        let settings = ForecastSettings {
            iterations: overrides.iterations.unwrap_or(self.iterations),
            period_days: overrides.period_days.unwrap_or(self.period_days),
            history_limit: history_window(overrides.history_limit.or(self.history_limit))?,
            seed: overrides.seed.or(self.seed),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl ForecastSettings {
    fn validate(&self) -> Result<(), ForecastConfigError> {
        if self.iterations == 0 {
            return Err(ForecastConfigError::Invalid("iterations must be greater than zero"));
        }
        if self.period_days == 0 {
            return Err(ForecastConfigError::Invalid("period_days must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ForecastConfig::from_yaml_str("{}", "forecast.yaml").unwrap();
        assert_eq!(config, ForecastConfig::default());
        assert_eq!(config.iterations, 5000);
        assert_eq!(config.period_days, 7);
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let config =
            ForecastConfig::from_yaml_str("seed: 42\nhistory_limit: 12\n", "forecast.yaml")
                .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.history_limit, Some(12));
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = ForecastConfig::from_yaml_str("iteration: 10\n", "forecast.yaml").unwrap_err();
        assert!(matches!(error, ForecastConfigError::Parse { .. }));
    }

    #[test]
    fn overrides_take_precedence() {
        let config = ForecastConfig {
            iterations: 100,
            period_days: 14,
            history_limit: Some(10),
            seed: Some(1),
        };
        let overrides = ConfigOverrides {
            iterations: Some(250),
            seed: Some(7),
            ..ConfigOverrides::default()
        };

        let settings = config.with_overrides(&overrides).unwrap();
        assert_eq!(
            settings,
            ForecastSettings {
                iterations: 250,
                period_days: 14,
                history_limit: NonZeroUsize::new(10),
                seed: Some(7),
            }
        );
    }

    #[test]
    fn zero_values_are_rejected() {
        for overrides in [
            ConfigOverrides {
                iterations: Some(0),
                ..ConfigOverrides::default()
            },
            ConfigOverrides {
                period_days: Some(0),
                ..ConfigOverrides::default()
            },
            ConfigOverrides {
                history_limit: Some(0),
                ..ConfigOverrides::default()
            },
        ] {
            let error = ForecastConfig::default().with_overrides(&overrides).unwrap_err();
            assert!(matches!(error, ForecastConfigError::Invalid(_)));
        }
    }

    #[test]
    fn history_window_rejects_zero_periods() {
        assert_eq!(history_window(None).unwrap(), None);
        assert_eq!(history_window(Some(4)).unwrap(), NonZeroUsize::new(4));
        let error = history_window(Some(0)).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid setting: history_limit must be greater than zero"
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let error = ForecastConfig::load(Some("/nonexistent/forecast.yaml")).unwrap_err();
        assert!(matches!(error, ForecastConfigError::Read { .. }));
    }
}
