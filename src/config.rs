use log::warn;
use tracing_subscriber::filter::LevelFilter;

pub const LOG_ENV_VAR: &str = "GRID_PATH_LOG";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

/// Runtime settings taken from the environment. The binary has no flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: LevelFilter,
    rejected_log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            rejected_log_level: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_log_level(std::env::var(LOG_ENV_VAR).ok().as_deref())
    }

    fn from_log_level(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Self::default(),
            Some(v) => match v.parse::<LevelFilter>() {
                Ok(log_level) => Self {
                    log_level,
                    rejected_log_level: None,
                },
                Err(_) => Self {
                    rejected_log_level: Some(v.to_string()),
                    ..Self::default()
                },
            },
        }
    }

    /// Installs a stderr subscriber that also receives `log` records.
    /// Stdout is left to the path output.
    pub fn init_logging(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        tracing_subscriber::fmt()
            .with_max_level(self.log_level)
            .with_writer(std::io::stderr)
            .try_init()?;

        if let Some(value) = &self.rejected_log_level {
            warn!(
                "ignoring {}={:?}, using {}",
                LOG_ENV_VAR, value, self.log_level
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(Config::from_log_level(None), Config::default());
        assert_eq!(Config::from_log_level(Some("  ")).log_level, LevelFilter::WARN);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(Config::from_log_level(Some("debug")).log_level, LevelFilter::DEBUG);
        assert_eq!(Config::from_log_level(Some("OFF")).log_level, LevelFilter::OFF);
        assert_eq!(Config::from_log_level(Some(" info ")).log_level, LevelFilter::INFO);
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = Config::from_log_level(Some("loud"));

        assert_eq!(config.log_level, LevelFilter::WARN);
        assert_eq!(config.rejected_log_level.as_deref(), Some("loud"));
    }
}
