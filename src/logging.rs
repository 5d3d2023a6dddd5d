//! Logger setup shared by the binaries.

use crate::config::{AppConfig, LogLevel};

/// Log level for this run: the command line wins over the config file.
pub fn resolve_level(cli: Option<LogLevel>, config: &AppConfig) -> LogLevel {
    cli.unwrap_or(config.preferences.log_level)
}

/// Install `env_logger` at `level`. `RUST_LOG` still overrides per module.
pub fn init(level: LogLevel) {
    let result = env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_level_overrides_config() {
        let mut config = AppConfig::default();
        config.preferences.log_level = LogLevel::Warn;
        assert_eq!(resolve_level(None, &config), LogLevel::Warn);
        assert_eq!(resolve_level(Some(LogLevel::Trace), &config), LogLevel::Trace);
        assert_eq!(resolve_level(None, &AppConfig::default()), LogLevel::Info);
    }
}
