//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::Calendar;
use crate::editor::DEFAULT_IDLE;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Path of the note database
    pub store: Option<PathBuf>,

    /// Idle time before autosave, in milliseconds
    pub autosave_ms: Option<u64>,

    /// Fixed UTC offset for day bucketing, e.g. "+02:00"
    pub utc_offset: Option<String>,

    /// Editor command for the `edit` command
    pub editor: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/daybook/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("daybook")
            .join("config.toml")
    }

    /// Resolve the database path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--store` argument
    /// 2. Config file `store` setting
    /// 3. `daybook/daybook.db` under the user data directory
    pub fn store_path(&self, cli_store: Option<&PathBuf>) -> PathBuf {
        cli_store
            .cloned()
            .or_else(|| self.store.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("daybook")
                    .join("daybook.db")
            })
    }

    /// Idle interval for the autosave debouncer.
    pub fn autosave_idle(&self) -> Duration {
        self.autosave_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_IDLE)
    }

    /// Calendar used to bucket timestamps into days.
    ///
    /// Without `utc_offset` this is the system's local timezone.
    pub fn calendar(&self) -> Result<Calendar> {
        match &self.utc_offset {
            Some(offset) => offset
                .parse()
                .with_context(|| format!("invalid utc_offset in config: {offset}")),
            None => Ok(Calendar::Local),
        }
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn default_config_is_empty() {
        let config = Config::default();
        assert!(config.store.is_none());
        assert_eq!(config.autosave_idle(), DEFAULT_IDLE);
        assert_eq!(config.calendar().unwrap(), Calendar::Local);
    }

    #[test]
    fn store_path_prefers_cli_arg() {
        let config = Config {
            store: Some(PathBuf::from("/config/daybook.db")),
            ..Config::default()
        };
        let cli = PathBuf::from("/cli/daybook.db");
        assert_eq!(config.store_path(Some(&cli)), cli);
    }

    #[test]
    fn store_path_falls_back_to_config() {
        let config = Config {
            store: Some(PathBuf::from("/config/daybook.db")),
            ..Config::default()
        };
        assert_eq!(
            config.store_path(None),
            PathBuf::from("/config/daybook.db")
        );
    }

    #[test]
    fn store_path_defaults_to_data_dir() {
        let path = Config::default().store_path(None);
        assert!(path.ends_with("daybook/daybook.db"));
    }

    #[test]
    fn parses_all_keys() {
        let config: Config = toml::from_str(
            r#"
            store = "/tmp/notes.db"
            autosave_ms = 250
            utc_offset = "+02:00"
            editor = "nano"
            "#,
        )
        .unwrap();

        assert_eq!(config.autosave_idle(), Duration::from_millis(250));
        assert_eq!(
            config.calendar().unwrap(),
            Calendar::Fixed(FixedOffset::east_opt(2 * 3600).unwrap())
        );
        assert_eq!(config.editor(), "nano");
    }

    #[test]
    fn bad_offset_is_reported() {
        let config = Config {
            utc_offset: Some("sometime".to_string()),
            ..Config::default()
        };
        let err = config.calendar().unwrap_err();
        assert!(format!("{err:#}").contains("utc_offset"));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("daybook/config.toml"));
    }
}
